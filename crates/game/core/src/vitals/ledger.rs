use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::coordinator::{KillReport, MatchCoordinator};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum VitalsError {
    #[error("max health must be finite and positive, got {0}")]
    InvalidMaxHealth(f32),
}

impl GameError for VitalsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "VITALS_INVALID_MAX_HEALTH"
    }
}

/// Result of a single damage application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed, never more than the health before the hit.
    pub applied: f32,
    pub health_before: f32,
    pub health_after: f32,
    /// True only for the hit that crossed zero.
    pub killed: bool,
}

impl DamageOutcome {
    const fn ignored(health: f32) -> Self {
        Self {
            applied: 0.0,
            health_before: health,
            health_after: health,
            killed: false,
        }
    }
}

/// Health of one character for one life.
///
/// Health only ever decreases. Once it reaches zero the ledger is terminal:
/// the match coordinator has been told, and every later damage call is a
/// no-op. A respawn installs a new ledger.
pub struct VitalityLedger {
    owner: EntityId,
    health: f32,
    max_health: f32,
    dead: bool,
    coordinator: Arc<dyn MatchCoordinator>,
}

impl VitalityLedger {
    /// Creates a ledger at full health.
    pub fn new(
        owner: EntityId,
        max_health: f32,
        coordinator: Arc<dyn MatchCoordinator>,
    ) -> Result<Self, VitalsError> {
        if !max_health.is_finite() || max_health <= 0.0 {
            return Err(VitalsError::InvalidMaxHealth(max_health));
        }

        Ok(Self {
            owner,
            health: max_health,
            max_health,
            dead: false,
            coordinator,
        })
    }

    /// Applies damage and returns how much health was removed.
    pub fn apply_damage(&mut self, amount: f32, source: Option<EntityId>) -> f32 {
        self.apply_damage_detailed(amount, source).applied
    }

    /// Applies damage, notifying the coordinator on the killing hit.
    ///
    /// Negative and NaN amounts are treated as zero.
    pub fn apply_damage_detailed(&mut self, amount: f32, source: Option<EntityId>) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::ignored(self.health);
        }

        let health_before = self.health;
        let applied = amount.max(0.0).min(health_before);
        self.health = (health_before - applied).max(0.0);
        self.dead = self.health <= 0.0;

        debug!(
            entity = %self.owner,
            applied,
            health_left = self.health,
            "health left"
        );

        if self.dead {
            info!(entity = %self.owner, killer = ?source, "entity killed");
            self.coordinator.on_entity_killed(&KillReport {
                victim: self.owner,
                killer: source,
            });
        }

        DamageOutcome {
            applied,
            health_before,
            health_after: self.health,
            killed: self.dead,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction of max health, in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        self.health / self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

impl fmt::Debug for VitalityLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VitalityLedger")
            .field("owner", &self.owner)
            .field("health", &self.health)
            .field("max_health", &self.max_health)
            .field("dead", &self.dead)
            .finish_non_exhaustive()
    }
}
