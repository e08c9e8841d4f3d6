//! The playable/AI character entity: vitals, abilities, and replicated state
//! bundled under one id.

mod capabilities;
mod held;

pub use capabilities::{AbilityHost, Damageable, Replicable};
pub use held::HeldItem;

use std::sync::Arc;

use tracing::{debug, info};

use crate::ability::{
    AbilityDef, AbilityError, AbilityInstance, AbilityOrchestrator, ActivationContext, InstanceId,
};
use crate::config::{CharacterTemplate, PolicyKind};
use crate::coordinator::MatchCoordinator;
use crate::error::{ErrorSeverity, GameError};
use crate::replication::AuthoritySyncState;
use crate::state::{ControllerId, EntityId, Role};
use crate::vitals::{DamageOutcome, VitalityLedger, VitalsError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error(transparent)]
    Vitals(#[from] VitalsError),

    #[error(transparent)]
    Abilities(#[from] AbilityError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Vitals(e) => e.severity(),
            Self::Abilities(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Vitals(e) => e.error_code(),
            Self::Abilities(e) => e.error_code(),
        }
    }
}

/// A character pawn.
#[derive(Debug)]
pub struct Character {
    id: EntityId,
    name: String,
    policy: Option<PolicyKind>,
    vitals: VitalityLedger,
    abilities: AbilityOrchestrator,
    sync: AuthoritySyncState,
    controller: Option<ControllerId>,
    /// Controller that possessed the pawn before death, re-attached on respawn.
    last_controller: Option<ControllerId>,
    collision_enabled: bool,
    held_item: Option<HeldItem>,
    /// Instances cancelled by death or respawn, not yet reported.
    cancelled: Vec<InstanceId>,
}

impl Character {
    pub fn spawn(
        id: EntityId,
        template: &CharacterTemplate,
        grants: Vec<Arc<AbilityDef>>,
        role: Role,
        coordinator: Arc<dyn MatchCoordinator>,
    ) -> Result<Self, SpawnError> {
        let vitals = VitalityLedger::new(id, template.max_health, coordinator)?;
        let abilities = AbilityOrchestrator::new(grants)?;

        Ok(Self {
            id,
            name: template.name.clone(),
            policy: template.policy,
            vitals,
            abilities,
            sync: AuthoritySyncState::new(id, role, template.character_level),
            controller: None,
            last_controller: None,
            collision_enabled: true,
            held_item: None,
            cancelled: Vec::new(),
        })
    }

    /// Grants startup abilities. Safe to call more than once.
    pub fn begin_play(&mut self) {
        let granted = self.abilities.grant_startup_abilities();
        if granted > 0 {
            debug!(entity = %self.id, granted, "character began play");
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> Option<PolicyKind> {
        self.policy
    }

    pub fn role(&self) -> Role {
        self.sync.role()
    }

    // ========================================================================
    // Control
    // ========================================================================

    pub fn controller(&self) -> Option<ControllerId> {
        self.controller
    }

    /// Possesses the pawn. Dead pawns cannot be possessed.
    pub fn attach_controller(&mut self, controller: ControllerId) -> bool {
        if self.is_dead() {
            return false;
        }
        self.controller = Some(controller);
        self.last_controller = Some(controller);
        true
    }

    pub fn detach_controller(&mut self) -> Option<ControllerId> {
        self.controller.take()
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn held_item(&self) -> Option<&HeldItem> {
        self.held_item.as_ref()
    }

    pub fn equip(&mut self, item: HeldItem) -> Option<HeldItem> {
        self.held_item.replace(item)
    }

    // ========================================================================
    // Vitals
    // ========================================================================

    /// Fraction of max health left, in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        self.vitals.health_fraction()
    }

    fn on_death(&mut self) {
        self.collision_enabled = false;
        let cancelled = self.abilities.cancel_all();
        let controller = self.detach_controller();
        info!(
            entity = %self.id,
            cancelled = cancelled.len(),
            controller = ?controller,
            "pawn removed from play"
        );
        self.cancelled.extend(cancelled);
    }

    /// Drains the instances cancelled by death or respawn since the last call.
    pub fn take_cancelled_abilities(&mut self) -> Vec<InstanceId> {
        std::mem::take(&mut self.cancelled)
    }

    /// Starts a new life at full health with the startup abilities re-granted,
    /// cooldowns cleared, and the previous controller re-attached.
    pub fn respawn(&mut self, coordinator: Arc<dyn MatchCoordinator>) -> Result<(), SpawnError> {
        self.vitals = VitalityLedger::new(self.id, self.vitals.max_health(), coordinator)?;
        let cancelled = self.abilities.cancel_all();
        self.cancelled.extend(cancelled);
        self.abilities.remove_startup_abilities();
        self.abilities.grant_startup_abilities();
        self.collision_enabled = true;
        self.controller = self.last_controller;
        info!(entity = %self.id, controller = ?self.controller, "character respawned");
        Ok(())
    }

    /// Advances abilities and cooldowns; returns completed instances.
    pub fn tick(&mut self, dt: f32) -> Vec<AbilityInstance> {
        self.abilities.tick(dt)
    }
}

impl Damageable for Character {
    fn vitals(&self) -> &VitalityLedger {
        &self.vitals
    }

    /// The killing hit also takes the pawn out of play.
    fn apply_damage(&mut self, amount: f32, source: Option<EntityId>) -> DamageOutcome {
        let outcome = self.vitals.apply_damage_detailed(amount, source);
        if outcome.killed {
            self.on_death();
        }
        outcome
    }
}

impl AbilityHost for Character {
    fn abilities(&self) -> &AbilityOrchestrator {
        &self.abilities
    }

    fn abilities_mut(&mut self) -> &mut AbilityOrchestrator {
        &mut self.abilities
    }

    fn activation_context(&self) -> ActivationContext {
        ActivationContext {
            role: self.sync.role(),
            character_level: self.sync.character_level(),
        }
    }

    /// Dead characters dispatch nothing.
    fn can_activate(&self) -> bool {
        !self.vitals.is_dead()
    }
}

impl Replicable for Character {
    fn sync(&self) -> &AuthoritySyncState {
        &self.sync
    }

    fn sync_mut(&mut self) -> &mut AuthoritySyncState {
        &mut self.sync
    }
}
