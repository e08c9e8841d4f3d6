use game_core::{
    AbilityCatalog, AbilityDef, AbilityHost, CharacterTemplate, EntityId, GameConfig, Intent,
    Replicable, Role, TagContainer,
};
use runtime::{GameEvent, ReplicationLink, RuntimeError, Simulation};

fn tags(labels: &[&str]) -> TagContainer {
    TagContainer::parse(labels).unwrap()
}

fn catalog() -> AbilityCatalog {
    AbilityCatalog::from_defs([
        AbilityDef::new("Spark", tags(&["Fire"])),
        AbilityDef::new("Meteor", tags(&["Fire.Heavy"])).server_only(),
    ])
    .unwrap()
}

fn config() -> GameConfig {
    GameConfig {
        sync_interval_ticks: 1,
        full_snapshot_interval_ticks: 0,
        ..GameConfig::default()
    }
}

fn pair() -> (Simulation, Simulation, EntityId) {
    let template = CharacterTemplate::new("Pyro").with_abilities(["Spark", "Meteor"]);

    let mut authority = Simulation::builder()
        .config(config())
        .catalog(catalog())
        .build()
        .unwrap();
    let mut observer = Simulation::builder()
        .role(Role::Observer)
        .config(config())
        .catalog(catalog())
        .build()
        .unwrap();

    let (entity, _) = authority.spawn_player(&template).unwrap();
    let (mirrored, _) = observer.spawn_player(&template).unwrap();
    assert_eq!(entity, mirrored);
    (authority, observer, entity)
}

#[test]
fn level_flows_from_authority_to_observer() {
    let (mut authority, observer, entity) = pair();
    let mut observers = [observer];
    let mut link = ReplicationLink::new();

    assert!(authority.set_character_level(entity, 4).unwrap());
    authority.step(0.1).unwrap();
    link.pump(&mut authority, &mut observers).unwrap();

    let observer = &mut observers[0];
    assert_eq!(observer.character(entity).unwrap().character_level(), 4);
    assert!(
        observer
            .drain_events()
            .contains(&GameEvent::LevelChanged { entity, level: 4 })
    );
    assert_eq!(link.stats().packets_forwarded, 1);
}

#[test]
fn observer_writes_are_refused_locally() {
    let (_, mut observer, entity) = pair();
    assert!(!observer.set_character_level(entity, 9).unwrap());
    assert_eq!(observer.character(entity).unwrap().character_level(), 1);
}

#[test]
fn clean_state_sends_nothing() {
    let (mut authority, _, _) = pair();
    authority.step(0.1).unwrap();
    authority.step(0.1).unwrap();
    assert!(authority.take_outbound_replication().is_empty());
}

#[test]
fn last_write_wins_and_stale_packets_are_dropped() {
    let (mut authority, mut observer, entity) = pair();

    authority.set_character_level(entity, 2).unwrap();
    authority.step(0.1).unwrap();
    authority.set_character_level(entity, 5).unwrap();
    authority.step(0.1).unwrap();

    let packets = authority.take_outbound_replication();
    assert_eq!(packets.len(), 2);

    assert_eq!(observer.apply_replication(&packets[1]).unwrap(), 1);
    assert_eq!(observer.apply_replication(&packets[0]).unwrap(), 0);
    assert_eq!(observer.character(entity).unwrap().character_level(), 5);
}

#[test]
fn full_snapshots_resend_clean_fields() {
    let config = GameConfig {
        sync_interval_ticks: 5,
        full_snapshot_interval_ticks: 2,
        ..GameConfig::default()
    };
    let mut authority = Simulation::builder().config(config).build().unwrap();
    authority.spawn_player(&CharacterTemplate::new("A")).unwrap();
    authority.spawn_player(&CharacterTemplate::new("B")).unwrap();

    authority.step(0.1).unwrap();
    assert!(authority.take_outbound_replication().is_empty());

    authority.step(0.1).unwrap();
    let packets = authority.take_outbound_replication();
    assert_eq!(packets.len(), 1);
    let packet: runtime::ServerPacket = runtime::replication::decode(&packets[0]).unwrap();
    assert_eq!(packet.tick, 2);
    assert_eq!(packet.snapshots.len(), 2);
    assert!(packet.snapshots.iter().all(|snapshot| snapshot.full));
}

#[test]
fn server_only_ability_is_forwarded_to_authority() {
    let (mut authority, observer, entity) = pair();
    let mut observers = [observer];
    let mut link = ReplicationLink::new();

    observers[0]
        .submit(entity, Intent::activate(tags(&["Fire"])))
        .unwrap();
    observers[0].step(0.1).unwrap();

    // Spark is predicted locally, Meteor waits for the authority.
    let local = observers[0].character(entity).unwrap();
    let names: Vec<_> = local
        .abilities()
        .active_abilities()
        .iter()
        .map(|instance| instance.name().to_owned())
        .collect();
    assert_eq!(names, ["Spark"]);

    link.pump(&mut authority, &mut observers).unwrap();
    assert_eq!(link.stats().requests_forwarded, 1);

    let remote = authority.character(entity).unwrap();
    let names: Vec<_> = remote
        .abilities()
        .active_abilities()
        .iter()
        .map(|instance| instance.name().to_owned())
        .collect();
    assert_eq!(names, ["Meteor"]);
    assert!(authority.drain_events().iter().any(|event| matches!(
        event,
        GameEvent::AbilityActivated { ability, .. } if ability == "Meteor"
    )));
}

#[test]
fn role_restricted_operations_fail_on_the_wrong_side() {
    let (mut authority, mut observer, entity) = pair();

    assert!(matches!(
        observer.apply_damage(entity, 10.0, None),
        Err(RuntimeError::WrongRole { .. })
    ));
    assert!(matches!(
        authority.apply_replication(&[]),
        Err(RuntimeError::WrongRole { .. })
    ));
    assert!(matches!(
        observer.apply_replication(&[0xff]),
        Err(RuntimeError::Codec(_))
    ));
}
