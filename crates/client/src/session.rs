//! One headless bot match: an authority, its observers, and the link between
//! them.

use anyhow::{Context, Result};
use game_content::ArenaContent;
use game_core::{EntityId, Replicable, Role};
use runtime::{GameEvent, LinkStats, ReplicationLink, ScoreBoard, Simulation};
use tracing::{debug, info, warn};

use crate::config::ArenaConfig;

/// Outcome of [`run_match`].
#[derive(Clone, Debug)]
pub struct MatchSummary {
    pub ticks: u64,
    pub winner: Option<(EntityId, u32)>,
    pub scores: ScoreBoard,
    pub events: u64,
    pub link: LinkStats,
    /// Every observer ended with the authority's character levels.
    pub observers_in_sync: bool,
}

/// Runs a match until the score limit is reached or the tick budget is spent.
pub fn run_match(config: &ArenaConfig, content: ArenaContent) -> Result<MatchSummary> {
    let mut game_config = content.config;
    if let Some(limit) = config.score_limit {
        game_config.score_limit = limit;
    }

    let build = |role: Role| -> Result<Simulation> {
        let mut sim = Simulation::builder()
            .role(role)
            .config(game_config.clone())
            .catalog(content.abilities.clone())
            .build()
            .with_context(|| format!("Failed to build {role} simulation"))?;
        for template in &content.roster {
            sim.spawn_character(template)
                .with_context(|| format!("Failed to spawn `{}`", template.name))?;
        }
        Ok(sim)
    };

    let mut authority = build(Role::Authority)?;
    let mut observers = (0..config.observers)
        .map(|_| build(Role::Observer))
        .collect::<Result<Vec<_>>>()?;
    let mut link = ReplicationLink::new();

    info!(
        characters = content.roster.len(),
        observers = observers.len(),
        score_limit = game_config.score_limit,
        "match starting"
    );

    let mut events = 0;
    while authority.tick() < config.max_ticks && !authority.is_match_over() {
        authority.step_fixed()?;
        for observer in &mut observers {
            observer.step_fixed()?;
        }
        link.pump(&mut authority, &mut observers)?;

        for event in authority.drain_events() {
            events += 1;
            log_event(&authority, &event);
        }
        for observer in &mut observers {
            observer.drain_events();
        }
    }

    if !authority.is_match_over() {
        warn!(ticks = authority.tick(), "tick budget spent before the score limit");
    }

    let observers_in_sync = observers.iter().all(|observer| {
        authority.characters().all(|character| {
            observer
                .character(character.id())
                .is_some_and(|mirror| mirror.character_level() == character.character_level())
        })
    });

    Ok(MatchSummary {
        ticks: authority.tick(),
        winner: authority.coordinator().winner(),
        scores: authority.scores(),
        events,
        link: link.stats(),
        observers_in_sync,
    })
}

fn log_event(sim: &Simulation, event: &GameEvent) {
    let name = |entity: EntityId| {
        sim.character(entity)
            .map(|character| character.name().to_owned())
            .unwrap_or_else(|| entity.to_string())
    };

    match event {
        GameEvent::Killed { victim, killer } => {
            let killer = killer.map(&name).unwrap_or_else(|| "the arena".to_owned());
            info!(tick = sim.tick(), "{} was killed by {}", name(*victim), killer);
        }
        GameEvent::Respawned { entity } => {
            info!(tick = sim.tick(), "{} respawned", name(*entity));
        }
        GameEvent::MatchEnded { winner, kills } => {
            info!(tick = sim.tick(), "{} wins with {} kills", name(*winner), kills);
        }
        other => debug!(tick = sim.tick(), event = ?other, "game event"),
    }
}

#[cfg(test)]
mod tests {
    use game_content::ContentFactory;

    use super::*;

    #[test]
    fn bundled_match_keeps_observers_in_sync() {
        let content = ContentFactory::bundled().load_all().unwrap();
        let config = ArenaConfig {
            max_ticks: 600,
            observers: 2,
            ..ArenaConfig::default()
        };

        let summary = run_match(&config, content).unwrap();
        assert!(summary.ticks <= 600);
        assert!(summary.observers_in_sync);
        assert!(summary.events > 0);
    }

    #[test]
    fn score_limit_override_ends_the_match() {
        let content = ContentFactory::bundled().load_all().unwrap();
        let config = ArenaConfig {
            score_limit: Some(1),
            observers: 0,
            ..ArenaConfig::default()
        };

        let summary = run_match(&config, content).unwrap();
        let (winner, kills) = summary.winner.unwrap();
        assert_eq!(kills, 1);
        assert_eq!(summary.scores.kills_of(winner), 1);
    }
}
