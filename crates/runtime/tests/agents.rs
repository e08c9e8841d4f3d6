use std::sync::Arc;

use behavior_tree::builder::action;
use behavior_tree::Status;
use game_core::{CharacterTemplate, Damageable, GameConfig, Intent, PolicyKind};
use runtime::{AgentState, BehaviorPolicy, GameEvent, MovementInput, MovementLog, Simulation, TreePolicy};

fn config(score_limit: u32) -> GameConfig {
    GameConfig {
        score_limit,
        respawn_enabled: false,
        ..GameConfig::default()
    }
}

fn gunner(name: &str) -> CharacterTemplate {
    CharacterTemplate::new(name)
        .with_held_item("rifle")
        .with_policy(PolicyKind::Gunner)
}

#[test]
fn gunner_kills_dummy_and_wins() {
    let mut sim = Simulation::builder().config(config(1)).build().unwrap();
    let hunter = sim.spawn_character(&gunner("Hunter")).unwrap();
    let target = sim
        .spawn_character(&CharacterTemplate::new("Target").with_policy(PolicyKind::Dummy))
        .unwrap();

    for _ in 0..4 {
        sim.step(0.1).unwrap();
    }
    assert_eq!(sim.character(target).unwrap().health(), 20.0);
    assert!(!sim.is_match_over());

    sim.step(0.1).unwrap();
    assert!(sim.character(target).unwrap().is_dead());
    assert!(sim.is_match_over());
    assert_eq!(sim.scores().kills_of(hunter), 1);

    let events = sim.drain_events();
    assert!(events.contains(&GameEvent::Killed {
        victim: target,
        killer: Some(hunter),
    }));
    assert!(events.contains(&GameEvent::MatchEnded {
        winner: hunter,
        kills: 1,
    }));
}

#[test]
fn agents_stop_deciding_once_the_match_is_over() {
    let mut sim = Simulation::builder().config(config(1)).build().unwrap();
    let hunter = sim.spawn_character(&gunner("Hunter")).unwrap();
    let victim = sim.spawn_character(&CharacterTemplate::new("Spare")).unwrap();
    let witness = sim
        .spawn_character(&CharacterTemplate::new("Witness").with_policy(PolicyKind::Dummy))
        .unwrap();

    sim.apply_damage(victim, 100.0, Some(hunter)).unwrap();
    assert!(sim.is_match_over());

    sim.drain_events();
    for _ in 0..10 {
        sim.step(0.1).unwrap();
    }
    assert_eq!(sim.character(witness).unwrap().health(), 100.0);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn agents_act_in_registration_order() {
    let movement = MovementLog::new();
    let mut sim = Simulation::builder()
        .movement(movement.clone())
        .build()
        .unwrap();

    let mut pawns = Vec::new();
    for value in [0.25_f32, 0.5, 0.75] {
        let policy: Arc<dyn BehaviorPolicy> = Arc::new(TreePolicy::new(
            "walker",
            action("walk", move |ctx: &mut runtime::AgentContext| {
                ctx.push_intent(Intent::MoveForward(value));
                Status::Success
            }),
        ));
        let (entity, _) = sim
            .spawn_agent(&CharacterTemplate::new("Walker"), Some(policy))
            .unwrap();
        pawns.push(entity);
    }

    sim.step(0.1).unwrap();
    let order: Vec<_> = movement
        .inputs()
        .into_iter()
        .filter_map(|input| match input {
            MovementInput::Axis { entity, .. } => Some(entity),
            _ => None,
        })
        .collect();
    assert_eq!(order, pawns);
}

#[test]
fn agent_without_policy_stays_idle() {
    let movement = MovementLog::new();
    let mut sim = Simulation::builder()
        .movement(movement.clone())
        .build()
        .unwrap();
    let (entity, _) = sim
        .spawn_agent(&CharacterTemplate::new("Statue"), None)
        .unwrap();

    sim.step(0.1).unwrap();
    let controller = sim.scheduler().controller_for(entity).unwrap();
    assert_eq!(controller.state(), AgentState::Idle);
    assert!(movement.inputs().is_empty());
}

#[test]
fn agent_resumes_after_respawn() {
    let config = GameConfig {
        respawn_delay: 1.0,
        score_limit: 0,
        ..GameConfig::default()
    };
    let mut sim = Simulation::builder().config(config).build().unwrap();
    let hunter = sim.spawn_character(&gunner("Hunter")).unwrap();
    let target = sim
        .spawn_character(&CharacterTemplate::new("Target").with_policy(PolicyKind::Dummy))
        .unwrap();

    sim.apply_damage(hunter, 100.0, Some(target)).unwrap();
    let controller = sim.scheduler().controller_for(hunter).unwrap();
    assert_eq!(controller.state(), AgentState::Idle);

    sim.step(0.5).unwrap();
    assert!(sim.character(hunter).unwrap().is_dead());
    assert_eq!(sim.character(target).unwrap().health(), 100.0);

    sim.step(0.5).unwrap();
    let respawned = sim.character(hunter).unwrap();
    assert!(!respawned.is_dead());
    assert!(respawned.controller().is_some());
    let controller = sim.scheduler().controller_for(hunter).unwrap();
    assert_eq!(controller.state(), AgentState::Running);

    sim.step(0.1).unwrap();
    assert_eq!(sim.character(target).unwrap().health(), 80.0);
}

#[test]
fn despawned_pawn_drops_its_agent() {
    let mut sim = Simulation::builder().build().unwrap();
    let hunter = sim.spawn_character(&gunner("Hunter")).unwrap();
    assert_eq!(sim.scheduler().len(), 1);

    sim.despawn(hunter).unwrap();
    sim.step(0.1).unwrap();
    assert!(sim.scheduler().is_empty());
    assert!(sim.submit(hunter, Intent::Jump).is_err());
}
