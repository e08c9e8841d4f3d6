//! Arena match rules: scoring, respawn scheduling, and the win condition.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use game_core::{EntityId, GameConfig, KillReport, MatchCoordinator};
use tracing::{debug, info};

/// Kills and deaths per entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    kills: BTreeMap<EntityId, u32>,
    deaths: BTreeMap<EntityId, u32>,
}

impl ScoreBoard {
    pub fn kills_of(&self, entity: EntityId) -> u32 {
        self.kills.get(&entity).copied().unwrap_or(0)
    }

    pub fn deaths_of(&self, entity: EntityId) -> u32 {
        self.deaths.get(&entity).copied().unwrap_or(0)
    }

    /// Entity with the most kills; ties go to the lowest id.
    pub fn leader(&self) -> Option<(EntityId, u32)> {
        self.kills
            .iter()
            .map(|(&entity, &kills)| (entity, kills))
            .fold(None, |best, (entity, kills)| match best {
                Some((_, top)) if top >= kills => best,
                _ => Some((entity, kills)),
            })
    }

    fn record(&mut self, report: &KillReport) -> Option<u32> {
        *self.deaths.entry(report.victim).or_default() += 1;

        let killer = report.killer.filter(|&killer| killer != report.victim)?;
        let kills = self.kills.entry(killer).or_default();
        *kills += 1;
        Some(*kills)
    }
}

/// Match rules applied by [`ArenaCoordinator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaRules {
    pub respawn_enabled: bool,
    /// Seconds between death and respawn.
    pub respawn_delay: f32,
    /// Kills that end the match; 0 disables the limit.
    pub score_limit: u32,
}

impl From<&GameConfig> for ArenaRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            respawn_enabled: config.respawn_enabled,
            respawn_delay: config.respawn_delay.max(0.0),
            score_limit: config.score_limit,
        }
    }
}

#[derive(Debug)]
struct PendingRespawn {
    entity: EntityId,
    remaining: f32,
}

#[derive(Debug, Default)]
struct ArenaState {
    board: ScoreBoard,
    unreported: Vec<KillReport>,
    respawns: Vec<PendingRespawn>,
    winner: Option<(EntityId, u32)>,
}

/// Free-for-all deathmatch coordinator.
///
/// Receives kill notifications from character ledgers during a step. The
/// simulation then drains the recorded kills and due respawns.
#[derive(Debug)]
pub struct ArenaCoordinator {
    rules: ArenaRules,
    state: Mutex<ArenaState>,
}

impl ArenaCoordinator {
    pub fn new(rules: ArenaRules) -> Self {
        Self {
            rules,
            state: Mutex::new(ArenaState::default()),
        }
    }

    pub fn rules(&self) -> ArenaRules {
        self.rules
    }

    fn state(&self) -> MutexGuard<'_, ArenaState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Kills recorded since the last call, in notification order.
    pub fn take_kills(&self) -> Vec<KillReport> {
        std::mem::take(&mut self.state().unreported)
    }

    /// Counts down pending respawns and returns the entities now due.
    pub fn tick_respawns(&self, dt: f32) -> Vec<EntityId> {
        let mut state = self.state();
        let mut due = Vec::new();
        state.respawns.retain_mut(|pending| {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                due.push(pending.entity);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending_respawns(&self) -> usize {
        self.state().respawns.len()
    }

    /// Drops a scheduled respawn (e.g. the entity was despawned).
    pub fn cancel_respawn(&self, entity: EntityId) {
        self.state().respawns.retain(|pending| pending.entity != entity);
    }

    /// The winner and their kill count, once the score limit was reached.
    pub fn winner(&self) -> Option<(EntityId, u32)> {
        self.state().winner
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn scores(&self) -> ScoreBoard {
        self.state().board.clone()
    }
}

impl MatchCoordinator for ArenaCoordinator {
    fn on_entity_killed(&self, report: &KillReport) {
        let mut state = self.state();
        let killer_score = state.board.record(report);
        state.unreported.push(*report);

        if state.winner.is_none()
            && let (Some(killer), Some(kills)) = (report.killer, killer_score)
            && self.rules.score_limit > 0
            && kills >= self.rules.score_limit
        {
            info!(winner = %killer, kills, "score limit reached");
            state.winner = Some((killer, kills));
        }

        if self.rules.respawn_enabled && state.winner.is_none() {
            debug!(
                entity = %report.victim,
                delay = self.rules.respawn_delay,
                "respawn scheduled"
            );
            state.respawns.push(PendingRespawn {
                entity: report.victim,
                remaining: self.rules.respawn_delay,
            });
        }
    }
}
