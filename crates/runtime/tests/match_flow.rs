use game_core::{
    AbilityCatalog, AbilityDef, AbilityHost, CharacterTemplate, Damageable, GameConfig,
    GameplayTag, Intent, TagContainer,
};
use runtime::{GameEvent, RuntimeError, Simulation};

fn tags(labels: &[&str]) -> TagContainer {
    TagContainer::parse(labels).unwrap()
}

fn arena(score_limit: u32, respawn_delay: f32) -> Simulation {
    let config = GameConfig {
        score_limit,
        respawn_delay,
        ..GameConfig::default()
    };
    Simulation::builder().config(config).build().unwrap()
}

#[test]
fn overkill_is_capped_and_kills_once() {
    let mut sim = arena(0, 3.0);
    let (attacker, _) = sim.spawn_player(&CharacterTemplate::new("Attacker")).unwrap();
    let (victim, _) = sim.spawn_player(&CharacterTemplate::new("Victim")).unwrap();

    assert_eq!(sim.apply_damage(victim, 150.0, Some(attacker)).unwrap(), 100.0);
    assert_eq!(sim.apply_damage(victim, 10.0, Some(attacker)).unwrap(), 0.0);

    let events = sim.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::Damaged {
                entity: victim,
                source: Some(attacker),
                amount: 100.0,
                health_before: 100.0,
                health_after: 0.0,
            },
            GameEvent::Killed {
                victim,
                killer: Some(attacker),
            },
        ]
    );
    assert_eq!(sim.scores().kills_of(attacker), 1);
    assert_eq!(sim.scores().deaths_of(victim), 1);
    assert_eq!(sim.coordinator().pending_respawns(), 1);
}

#[test]
fn dead_pawn_loses_control_and_ignores_input() {
    let mut sim = arena(0, 3.0);
    let (victim, _) = sim.spawn_player(&CharacterTemplate::new("Victim")).unwrap();
    sim.apply_damage(victim, 100.0, None).unwrap();

    let character = sim.character(victim).unwrap();
    assert!(character.controller().is_none());
    assert!(!character.collision_enabled());

    sim.submit(victim, Intent::Jump).unwrap();
    sim.drain_events();
    sim.step(0.1).unwrap();
    assert!(sim.drain_events().is_empty());
}

#[test]
fn suicide_and_environment_kills_score_nothing() {
    let mut sim = arena(1, 3.0);
    let (a, _) = sim.spawn_player(&CharacterTemplate::new("A")).unwrap();
    let (b, _) = sim.spawn_player(&CharacterTemplate::new("B")).unwrap();

    sim.apply_damage(a, 100.0, Some(a)).unwrap();
    sim.apply_damage(b, 100.0, None).unwrap();

    let scores = sim.scores();
    assert_eq!(scores.kills_of(a), 0);
    assert_eq!(scores.deaths_of(a), 1);
    assert_eq!(scores.deaths_of(b), 1);
    assert!(!sim.is_match_over());
}

#[test]
fn respawn_restores_player_with_controller() {
    let mut sim = arena(0, 1.0);
    let (player, controller) = sim.spawn_player(&CharacterTemplate::new("Player")).unwrap();
    sim.apply_damage(player, 100.0, None).unwrap();
    sim.drain_events();

    sim.step(0.5).unwrap();
    assert!(sim.character(player).unwrap().is_dead());

    sim.step(0.5).unwrap();
    let character = sim.character(player).unwrap();
    assert_eq!(character.health(), 100.0);
    assert_eq!(character.controller(), Some(controller));
    assert!(character.collision_enabled());
    assert_eq!(sim.drain_events(), vec![GameEvent::Respawned { entity: player }]);
}

#[test]
fn winning_kill_ends_the_match_without_respawn() {
    let mut sim = arena(2, 0.5);
    let (a, _) = sim.spawn_player(&CharacterTemplate::new("A")).unwrap();
    let (b, _) = sim.spawn_player(&CharacterTemplate::new("B")).unwrap();

    sim.apply_damage(b, 100.0, Some(a)).unwrap();
    sim.step(0.5).unwrap();
    assert!(!sim.character(b).unwrap().is_dead());

    sim.apply_damage(b, 100.0, Some(a)).unwrap();
    assert!(sim.is_match_over());
    assert_eq!(sim.coordinator().winner(), Some((a, 2)));
    assert_eq!(sim.coordinator().pending_respawns(), 0);

    let ended = sim
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, GameEvent::MatchEnded { .. }))
        .count();
    assert_eq!(ended, 1);
}

#[test]
fn timed_ability_ends_during_step() {
    let catalog = AbilityCatalog::from_defs([
        AbilityDef::new("Dash", tags(&["Movement.Dash"])).with_duration(0.2),
    ])
    .unwrap();
    let mut sim = Simulation::builder().catalog(catalog).build().unwrap();
    let (runner, _) = sim
        .spawn_player(&CharacterTemplate::new("Runner").with_abilities(["Dash"]))
        .unwrap();

    sim.submit(runner, Intent::activate(tags(&["Movement"]))).unwrap();
    sim.step(0.1).unwrap();
    assert_eq!(sim.character(runner).unwrap().abilities().active_abilities().len(), 1);

    sim.step(0.1).unwrap();
    assert!(sim.character(runner).unwrap().abilities().active_abilities().is_empty());
    assert!(sim.drain_events().iter().any(|event| matches!(
        event,
        GameEvent::AbilityEnded { entity, cancelled: false, .. } if *entity == runner
    )));
}

#[test]
fn death_ends_running_abilities_and_respawn_resets_cooldowns() {
    let catalog = AbilityCatalog::from_defs([AbilityDef::new("Shield", tags(&["Defense"]))
        .with_cooldown(GameplayTag::new("Cooldown.Shield").unwrap(), 30.0)])
    .unwrap();
    let config = GameConfig {
        score_limit: 0,
        respawn_delay: 1.0,
        ..GameConfig::default()
    };
    let mut sim = Simulation::builder()
        .config(config)
        .catalog(catalog)
        .build()
        .unwrap();
    let (guard, _) = sim
        .spawn_player(&CharacterTemplate::new("Guard").with_abilities(["Shield"]))
        .unwrap();

    sim.submit(guard, Intent::activate(tags(&["Defense"]))).unwrap();
    sim.step(0.1).unwrap();
    sim.apply_damage(guard, 1000.0, None).unwrap();
    sim.step(0.5).unwrap();
    sim.step(0.5).unwrap();

    let events = sim.drain_events();
    let started = events
        .iter()
        .filter(|event| matches!(event, GameEvent::AbilityActivated { .. }))
        .count();
    let ended = events
        .iter()
        .filter(|event| matches!(event, GameEvent::AbilityEnded { cancelled: true, .. }))
        .count();
    assert_eq!(started, 1);
    assert_eq!(started, ended);

    let killed = events
        .iter()
        .position(|event| matches!(event, GameEvent::Killed { .. }))
        .unwrap();
    let cancelled = events
        .iter()
        .position(|event| matches!(event, GameEvent::AbilityEnded { .. }))
        .unwrap();
    assert!(cancelled < killed);
    assert!(events.contains(&GameEvent::Respawned { entity: guard }));

    let character = sim.character(guard).unwrap();
    assert!(!character.is_dead());
    assert!(
        character
            .cooldown_remaining_for_tags(&tags(&["Cooldown.Shield"]))
            .is_none()
    );
}

#[test]
fn unknown_abilities_and_bad_config_are_rejected() {
    let mut sim = Simulation::builder().build().unwrap();
    let template = CharacterTemplate::new("Wizard").with_abilities(["Nonexistent"]);
    assert!(matches!(
        sim.spawn_player(&template),
        Err(RuntimeError::Catalog(_))
    ));
    assert!(matches!(
        sim.spawn_player(&CharacterTemplate::new("Ghost").with_max_health(-1.0)),
        Err(RuntimeError::Spawn { .. })
    ));

    let config = GameConfig {
        tick_rate: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        Simulation::builder().config(config).build(),
        Err(RuntimeError::InvalidConfig(_))
    ));
}
