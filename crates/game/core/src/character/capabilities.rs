//! Capability interfaces an entity exposes to the simulation.
//!
//! Each interface is backed by one owned component: [`Damageable`] by a
//! [`VitalityLedger`], [`AbilityHost`] by an [`AbilityOrchestrator`], and
//! [`Replicable`] by an [`AuthoritySyncState`]. Implementors supply the
//! component accessors; the operations come with the trait.

use crate::ability::{
    AbilityInstance, AbilityOrchestrator, ActivationContext, ActivationReport, CooldownRemaining,
    TagContainer,
};
use crate::replication::{AuthoritySyncState, ReplicationSnapshot};
use crate::state::EntityId;
use crate::vitals::{DamageOutcome, VitalityLedger};

/// Something with health that can be damaged and killed.
pub trait Damageable {
    fn vitals(&self) -> &VitalityLedger;

    /// Applies damage from `source`. Dead entities absorb nothing.
    fn apply_damage(&mut self, amount: f32, source: Option<EntityId>) -> DamageOutcome;

    fn health(&self) -> f32 {
        self.vitals().health()
    }

    fn max_health(&self) -> f32 {
        self.vitals().max_health()
    }

    fn is_dead(&self) -> bool {
        self.vitals().is_dead()
    }
}

/// Something that owns granted abilities and can activate them by tag.
pub trait AbilityHost {
    fn abilities(&self) -> &AbilityOrchestrator;

    fn abilities_mut(&mut self) -> &mut AbilityOrchestrator;

    fn activation_context(&self) -> ActivationContext;

    /// False while the host is out of play. Nothing is dispatched then.
    fn can_activate(&self) -> bool {
        true
    }

    /// Activates every granted ability matching `tags`, returning the report.
    fn activate_abilities_detailed(
        &mut self,
        tags: &TagContainer,
        allow_remote: bool,
    ) -> ActivationReport {
        if !self.can_activate() {
            return ActivationReport::default();
        }
        let ctx = self.activation_context();
        self.abilities_mut()
            .activate_by_tags_detailed(tags, allow_remote, ctx)
    }

    /// True if at least one matching ability was dispatched.
    fn activate_abilities_with_tags(&mut self, tags: &TagContainer, allow_remote: bool) -> bool {
        self.activate_abilities_detailed(tags, allow_remote)
            .was_attempted()
    }

    fn active_abilities_with_tags(&self, tags: &TagContainer) -> Vec<&AbilityInstance> {
        self.abilities().active_abilities_with_tags(tags)
    }

    fn cooldown_remaining_for_tags(&self, tags: &TagContainer) -> Option<CooldownRemaining> {
        self.abilities().cooldown_remaining(tags)
    }
}

/// Something carrying authority-replicated fields.
pub trait Replicable {
    fn sync(&self) -> &AuthoritySyncState;

    fn sync_mut(&mut self) -> &mut AuthoritySyncState;

    fn character_level(&self) -> i32 {
        self.sync().character_level()
    }

    /// Writes the level on the authority. Observers get `false`.
    fn set_character_level(&mut self, level: i32) -> bool {
        self.sync_mut().set_character_level(level)
    }

    fn collect_snapshot(&mut self) -> Option<ReplicationSnapshot> {
        self.sync_mut().collect_snapshot()
    }

    fn full_snapshot(&self) -> Option<ReplicationSnapshot> {
        self.sync().full_snapshot()
    }

    fn apply_snapshot(&mut self, snapshot: &ReplicationSnapshot) -> bool {
        self.sync_mut().apply_snapshot(snapshot)
    }
}
