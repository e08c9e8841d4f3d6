//! Ability orchestration: granting, tag-based activation, and queries.
//!
//! Activation is two-staged. *Dispatch* decides whether the request may run on
//! this role at all (locally, or forwarded to the authority). Dispatched
//! abilities then go through their own activation checks (level, re-entry,
//! cooldown), which may still reject them. [`AbilityOrchestrator::activate_by_tags`]
//! reports dispatch only, so a `true` return is a best-effort signal.

use std::sync::Arc;

use arrayvec::ArrayVec;
use tracing::debug;

use super::cooldown::{CooldownRemaining, CooldownTable};
use super::def::{AbilityDef, NetExecution};
use super::instance::{AbilityHandle, AbilityInstance, InstanceId};
use super::tag::{GameplayTag, TagContainer};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Role;

/// Role and level of the owning character at the time of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationContext {
    pub role: Role,
    pub character_level: i32,
}

/// Errors raised while configuring an orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("{count} abilities granted, at most {max} are supported")]
    TooManyGrants { count: usize, max: usize },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ABILITY_TOO_MANY_GRANTS"
    }
}

/// Why a dispatched ability did not start.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActivationFailure {
    #[error("{0} is not granted")]
    NotGranted(AbilityHandle),

    #[error("character level {level} is below required level {required}")]
    LevelTooLow { required: i32, level: i32 },

    #[error("ability is already active")]
    AlreadyActive,

    #[error("cooldown {tag} has {remaining:.2}s remaining")]
    OnCooldown { tag: GameplayTag, remaining: f32 },
}

impl GameError for ActivationFailure {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotGranted(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotGranted(_) => "ABILITY_NOT_GRANTED",
            Self::LevelTooLow { .. } => "ABILITY_LEVEL_TOO_LOW",
            Self::AlreadyActive => "ABILITY_ALREADY_ACTIVE",
            Self::OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
        }
    }
}

/// A successful activation and the instances it superseded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub instance: InstanceId,
    pub cancelled: Vec<InstanceId>,
}

/// Detailed outcome of an activate-by-tags request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivationReport {
    /// Matches that were dispatched (locally or to the authority).
    pub attempted: usize,
    pub activated: Vec<(AbilityHandle, InstanceId)>,
    pub cancelled: Vec<InstanceId>,
    pub remote_requests: Vec<AbilityHandle>,
    pub failures: Vec<(AbilityHandle, ActivationFailure)>,
}

impl ActivationReport {
    pub fn was_attempted(&self) -> bool {
        self.attempted > 0
    }
}

/// Owns a character's granted abilities, running instances, and cooldowns.
#[derive(Clone, Debug, Default)]
pub struct AbilityOrchestrator {
    grants: ArrayVec<Arc<AbilityDef>, { GameConfig::MAX_ABILITIES }>,
    granted: ArrayVec<AbilityHandle, { GameConfig::MAX_ABILITIES }>,
    active: Vec<AbilityInstance>,
    cooldowns: CooldownTable,
    pending_remote: Vec<AbilityHandle>,
    next_instance: u64,
    abilities_initialized: bool,
}

impl AbilityOrchestrator {
    /// Creates an orchestrator with an immutable grant list.
    ///
    /// Nothing is granted until [`Self::grant_startup_abilities`] runs.
    pub fn new<I>(grants: I) -> Result<Self, AbilityError>
    where
        I: IntoIterator<Item = Arc<AbilityDef>>,
    {
        let grants: Vec<_> = grants.into_iter().collect();
        if grants.len() > GameConfig::MAX_ABILITIES {
            return Err(AbilityError::TooManyGrants {
                count: grants.len(),
                max: GameConfig::MAX_ABILITIES,
            });
        }

        Ok(Self {
            grants: grants.into_iter().collect(),
            ..Self::default()
        })
    }

    // ========================================================================
    // Granting
    // ========================================================================

    /// Grants every entry of the grant list exactly once.
    ///
    /// Returns the number of abilities granted by this call (0 when they
    /// already were).
    pub fn grant_startup_abilities(&mut self) -> usize {
        if self.abilities_initialized {
            return 0;
        }

        self.granted.clear();
        for index in 0..self.grants.len() {
            self.granted.push(AbilityHandle(index as u32));
        }
        self.abilities_initialized = true;

        debug!(count = self.granted.len(), "granted startup abilities");
        self.granted.len()
    }

    /// Removes every startup ability, cancels their running instances and
    /// clears running cooldowns.
    ///
    /// Idempotent: removing already-absent abilities is a no-op.
    pub fn remove_startup_abilities(&mut self) -> usize {
        if !self.abilities_initialized {
            return 0;
        }

        let removed = self.granted.len();
        let cancelled = self.cancel_all();
        self.granted.clear();
        self.cooldowns.clear();
        self.pending_remote.clear();
        self.abilities_initialized = false;

        debug!(
            removed,
            cancelled = cancelled.len(),
            "removed startup abilities"
        );
        removed
    }

    pub fn abilities_initialized(&self) -> bool {
        self.abilities_initialized
    }

    pub fn is_granted(&self, handle: AbilityHandle) -> bool {
        self.granted.contains(&handle)
    }

    /// Granted abilities in grant order.
    pub fn granted(&self) -> impl Iterator<Item = (AbilityHandle, &AbilityDef)> + '_ {
        self.granted
            .iter()
            .filter_map(|&handle| self.def(handle).map(|def| (handle, def)))
    }

    /// The immutable grant list.
    pub fn grant_list(&self) -> &[Arc<AbilityDef>] {
        &self.grants
    }

    /// Definition behind a handle, granted or not.
    pub fn def(&self, handle: AbilityHandle) -> Option<&AbilityDef> {
        self.grants.get(handle.0 as usize).map(Arc::as_ref)
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Attempts to activate every granted ability whose tags intersect `tags`.
    ///
    /// Returns true if at least one match was dispatched. A dispatched ability
    /// may still fail its own activation checks.
    pub fn activate_by_tags(
        &mut self,
        tags: &TagContainer,
        allow_remote_activation: bool,
        ctx: ActivationContext,
    ) -> bool {
        self.activate_by_tags_detailed(tags, allow_remote_activation, ctx)
            .was_attempted()
    }

    /// Same as [`Self::activate_by_tags`], returning the full report.
    pub fn activate_by_tags_detailed(
        &mut self,
        tags: &TagContainer,
        allow_remote_activation: bool,
        ctx: ActivationContext,
    ) -> ActivationReport {
        let matches: Vec<(AbilityHandle, NetExecution)> = self
            .granted()
            .filter(|(_, def)| def.tags.has_any(tags))
            .map(|(handle, def)| (handle, def.net_execution))
            .collect();

        let mut report = ActivationReport::default();
        for (handle, net_execution) in matches {
            match (ctx.role, net_execution) {
                (Role::Authority, _) | (Role::Observer, NetExecution::LocalPredicted) => {
                    report.attempted += 1;
                    match self.activate_handle(handle, ctx) {
                        Ok(activation) => {
                            report.activated.push((handle, activation.instance));
                            report.cancelled.extend(activation.cancelled);
                        }
                        Err(failure) => {
                            debug!(%handle, %failure, "ability activation rejected");
                            report.failures.push((handle, failure));
                        }
                    }
                }
                (Role::Observer, NetExecution::ServerOnly) if allow_remote_activation => {
                    report.attempted += 1;
                    self.pending_remote.push(handle);
                    report.remote_requests.push(handle);
                    debug!(%handle, "queued remote activation request");
                }
                (Role::Observer, NetExecution::ServerOnly) => {
                    debug!(%handle, "server-only ability skipped without remote activation");
                }
            }
        }

        report
    }

    /// Runs the activation checks for one ability without starting it.
    pub fn can_activate(
        &self,
        handle: AbilityHandle,
        ctx: ActivationContext,
    ) -> Result<(), ActivationFailure> {
        let Some(def) = self.def(handle).filter(|_| self.is_granted(handle)) else {
            return Err(ActivationFailure::NotGranted(handle));
        };

        if ctx.character_level < def.required_level {
            return Err(ActivationFailure::LevelTooLow {
                required: def.required_level,
                level: ctx.character_level,
            });
        }
        if self.active.iter().any(|instance| instance.handle() == handle) {
            return Err(ActivationFailure::AlreadyActive);
        }
        if let Some(spec) = &def.cooldown
            && let Some(running) = self.cooldowns.get(&spec.tag)
        {
            return Err(ActivationFailure::OnCooldown {
                tag: spec.tag.clone(),
                remaining: running.remaining,
            });
        }
        Ok(())
    }

    /// Runs the activation checks for one granted ability and starts it.
    ///
    /// This is the entry point the authority uses for remote requests; it
    /// performs no role dispatch.
    pub fn activate_handle(
        &mut self,
        handle: AbilityHandle,
        ctx: ActivationContext,
    ) -> Result<Activation, ActivationFailure> {
        self.can_activate(handle, ctx)?;
        let def = Arc::clone(&self.grants[handle.0 as usize]);

        let cancelled = if def.cancels.is_empty() {
            Vec::new()
        } else {
            self.cancel_abilities_with_tags(&def.cancels)
        };

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        if let Some(spec) = &def.cooldown {
            self.cooldowns.start(spec.tag.clone(), spec.duration);
        }
        debug!(ability = %def.name, instance = id.0, "ability activated");
        self.active
            .push(AbilityInstance::new(id, handle, Arc::clone(&def)));

        Ok(Activation {
            instance: id,
            cancelled,
        })
    }

    /// Drains activation requests that must be forwarded to the authority.
    pub fn take_remote_requests(&mut self) -> Vec<AbilityHandle> {
        std::mem::take(&mut self.pending_remote)
    }

    // ========================================================================
    // Completion / cancellation
    // ========================================================================

    /// Ends a running instance. Returns it if it was active.
    pub fn end_ability(&mut self, id: InstanceId) -> Option<AbilityInstance> {
        let index = self.active.iter().position(|instance| instance.id() == id)?;
        Some(self.active.remove(index))
    }

    /// Cancels every running instance whose tags intersect `tags`.
    pub fn cancel_abilities_with_tags(&mut self, tags: &TagContainer) -> Vec<InstanceId> {
        let mut cancelled = Vec::new();
        self.active.retain(|instance| {
            if instance.tags().has_any(tags) {
                cancelled.push(instance.id());
                false
            } else {
                true
            }
        });
        if !cancelled.is_empty() {
            debug!(count = cancelled.len(), %tags, "cancelled abilities");
        }
        cancelled
    }

    /// Cancels every running instance.
    pub fn cancel_all(&mut self) -> Vec<InstanceId> {
        self.active.drain(..).map(|instance| instance.id()).collect()
    }

    /// Advances running instances and cooldowns by `dt` seconds.
    ///
    /// Returns the timed instances that completed during this step.
    pub fn tick(&mut self, dt: f32) -> Vec<AbilityInstance> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let mut completed = Vec::new();
        let mut index = 0;
        while index < self.active.len() {
            self.active[index].advance(dt);
            if self.active[index].is_complete() {
                completed.push(self.active.remove(index));
            } else {
                index += 1;
            }
        }

        self.cooldowns.tick(dt);
        completed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Running instances whose tags intersect `tags`, in activation order.
    pub fn active_abilities_with_tags(&self, tags: &TagContainer) -> Vec<&AbilityInstance> {
        self.active
            .iter()
            .filter(|instance| instance.tags().has_any(tags))
            .collect()
    }

    /// All running instances, in activation order.
    pub fn active_abilities(&self) -> &[AbilityInstance] {
        &self.active
    }

    /// Binding cooldown among those matching `tags`, if any.
    pub fn cooldown_remaining(&self, tags: &TagContainer) -> Option<CooldownRemaining> {
        self.cooldowns.remaining(tags)
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORITY: ActivationContext = ActivationContext {
        role: Role::Authority,
        character_level: 1,
    };

    const OBSERVER: ActivationContext = ActivationContext {
        role: Role::Observer,
        character_level: 1,
    };

    fn tags(labels: &[&str]) -> TagContainer {
        TagContainer::parse(labels).unwrap()
    }

    fn tag(label: &str) -> GameplayTag {
        GameplayTag::new(label).unwrap()
    }

    fn granted(defs: Vec<AbilityDef>) -> AbilityOrchestrator {
        let mut orchestrator =
            AbilityOrchestrator::new(defs.into_iter().map(Arc::new)).unwrap();
        orchestrator.grant_startup_abilities();
        orchestrator
    }

    fn fire_and_ice() -> AbilityOrchestrator {
        granted(vec![
            AbilityDef::new("Fireball", tags(&["Fire"])),
            AbilityDef::new("Frost Nova", tags(&["Ice"])),
        ])
    }

    #[test]
    fn activates_only_matching_tags() {
        let mut abilities = fire_and_ice();

        assert!(abilities.activate_by_tags(&tags(&["Ice"]), true, AUTHORITY));

        assert!(abilities.active_abilities_with_tags(&tags(&["Fire"])).is_empty());
        let ice = abilities.active_abilities_with_tags(&tags(&["Ice"]));
        assert_eq!(ice.len(), 1);
        assert_eq!(ice[0].name(), "Frost Nova");
    }

    #[test]
    fn no_match_is_not_an_attempt() {
        let mut abilities = fire_and_ice();
        assert!(!abilities.activate_by_tags(&tags(&["Lightning"]), true, AUTHORITY));
        assert!(abilities.active_abilities().is_empty());
    }

    #[test]
    fn active_abilities_keep_activation_order() {
        let mut abilities = granted(vec![
            AbilityDef::new("Bolt", tags(&["Ability.Fire.Bolt"])),
            AbilityDef::new("Wall", tags(&["Ability.Fire.Wall"])),
        ]);

        abilities.activate_by_tags(&tags(&["Ability.Fire.Wall"]), true, AUTHORITY);
        abilities.activate_by_tags(&tags(&["Ability.Fire.Bolt"]), true, AUTHORITY);

        let names: Vec<_> = abilities
            .active_abilities_with_tags(&tags(&["Ability.Fire"]))
            .into_iter()
            .map(AbilityInstance::name)
            .collect();
        assert_eq!(names, ["Wall", "Bolt"]);
    }

    #[test]
    fn attempt_is_reported_even_when_cooldown_rejects() {
        let mut abilities = granted(vec![
            AbilityDef::new("Fireball", tags(&["Fire"]))
                .with_cooldown(tag("Cooldown.Fire"), 5.0)
                .with_duration(0.5),
        ]);

        assert!(abilities.activate_by_tags(&tags(&["Fire"]), true, AUTHORITY));
        abilities.tick(1.0);
        assert!(abilities.active_abilities().is_empty());

        let report = abilities.activate_by_tags_detailed(&tags(&["Fire"]), true, AUTHORITY);
        assert!(report.was_attempted());
        assert!(report.activated.is_empty());
        assert!(matches!(
            report.failures[0].1,
            ActivationFailure::OnCooldown { .. }
        ));

        let cooldown = abilities
            .cooldown_remaining(&tags(&["Cooldown"]))
            .unwrap();
        assert_eq!(cooldown.remaining, 4.0);
        assert_eq!(cooldown.duration, 5.0);
    }

    #[test]
    fn level_gate_rejects_low_level() {
        let mut abilities =
            granted(vec![AbilityDef::new("Meteor", tags(&["Fire"])).with_required_level(5)]);

        let report = abilities.activate_by_tags_detailed(&tags(&["Fire"]), true, AUTHORITY);
        assert_eq!(
            report.failures,
            vec![(
                AbilityHandle(0),
                ActivationFailure::LevelTooLow {
                    required: 5,
                    level: 1
                }
            )]
        );

        let veteran = ActivationContext {
            character_level: 5,
            ..AUTHORITY
        };
        assert_eq!(
            abilities
                .activate_by_tags_detailed(&tags(&["Fire"]), true, veteran)
                .activated
                .len(),
            1
        );
    }

    #[test]
    fn running_ability_cannot_reenter() {
        let mut abilities = fire_and_ice();
        abilities.activate_by_tags(&tags(&["Fire"]), true, AUTHORITY);
        let report = abilities.activate_by_tags_detailed(&tags(&["Fire"]), true, AUTHORITY);
        assert_eq!(report.failures[0].1, ActivationFailure::AlreadyActive);
        assert_eq!(abilities.active_abilities().len(), 1);
    }

    #[test]
    fn later_activation_cancels_conflicting_tags() {
        let mut abilities = granted(vec![
            AbilityDef::new("Aim", tags(&["Stance.Aim"])),
            AbilityDef::new("Sprint", tags(&["Stance.Sprint"])).cancelling(tags(&["Stance.Aim"])),
        ]);

        abilities.activate_by_tags(&tags(&["Stance.Aim"]), true, AUTHORITY);
        let report = abilities.activate_by_tags_detailed(&tags(&["Stance.Sprint"]), true, AUTHORITY);

        assert_eq!(report.cancelled.len(), 1);
        assert!(abilities.active_abilities_with_tags(&tags(&["Stance.Aim"])).is_empty());
        assert_eq!(abilities.active_abilities().len(), 1);
    }

    #[test]
    fn observer_forwards_server_only_when_allowed() {
        let mut abilities = granted(vec![
            AbilityDef::new("Revive", tags(&["Support"])).server_only(),
            AbilityDef::new("Dodge", tags(&["Support"])),
        ]);

        let report = abilities.activate_by_tags_detailed(&tags(&["Support"]), true, OBSERVER);
        assert_eq!(report.attempted, 2);
        assert_eq!(report.remote_requests, vec![AbilityHandle(0)]);
        assert_eq!(report.activated.len(), 1);
        assert_eq!(abilities.take_remote_requests(), vec![AbilityHandle(0)]);
        assert!(abilities.take_remote_requests().is_empty());
    }

    #[test]
    fn observer_skips_server_only_without_remote_activation() {
        let mut abilities =
            granted(vec![AbilityDef::new("Revive", tags(&["Support"])).server_only()]);

        assert!(!abilities.activate_by_tags(&tags(&["Support"]), false, OBSERVER));
        assert!(abilities.take_remote_requests().is_empty());
        assert!(abilities.active_abilities().is_empty());
    }

    #[test]
    fn timed_abilities_complete_on_tick() {
        let mut abilities =
            granted(vec![AbilityDef::new("Dash", tags(&["Movement"])).with_duration(0.25)]);
        abilities.activate_by_tags(&tags(&["Movement"]), true, AUTHORITY);

        assert!(abilities.tick(0.1).is_empty());
        let completed = abilities.tick(0.2);
        assert_eq!(completed.len(), 1);
        assert!(abilities.active_abilities().is_empty());
    }

    #[test]
    fn end_ability_removes_instance() {
        let mut abilities = fire_and_ice();
        let report = abilities.activate_by_tags_detailed(&tags(&["Fire"]), true, AUTHORITY);
        let (_, id) = report.activated[0];

        assert!(abilities.end_ability(id).is_some());
        assert!(abilities.end_ability(id).is_none());
    }

    #[test]
    fn grant_and_remove_are_idempotent() {
        let mut abilities = AbilityOrchestrator::new(vec![Arc::new(AbilityDef::new(
            "Fireball",
            tags(&["Fire"]),
        ))])
        .unwrap();

        assert!(!abilities.activate_by_tags(&tags(&["Fire"]), true, AUTHORITY));
        assert_eq!(abilities.grant_startup_abilities(), 1);
        assert_eq!(abilities.grant_startup_abilities(), 0);

        abilities.activate_by_tags(&tags(&["Fire"]), true, AUTHORITY);
        assert_eq!(abilities.remove_startup_abilities(), 1);
        assert_eq!(abilities.remove_startup_abilities(), 0);
        assert!(abilities.active_abilities().is_empty());
        assert!(!abilities.activate_by_tags(&tags(&["Fire"]), true, AUTHORITY));

        assert_eq!(abilities.grant_startup_abilities(), 1);
        assert!(abilities.is_granted(AbilityHandle(0)));
    }

    #[test]
    fn removing_startup_abilities_clears_cooldowns() {
        let mut abilities = granted(vec![
            AbilityDef::new("Shield", tags(&["Defense"])).with_cooldown(tag("Cooldown.Shield"), 30.0),
        ]);
        abilities.activate_by_tags(&tags(&["Defense"]), true, AUTHORITY);
        assert!(abilities.cooldown_remaining(&tags(&["Cooldown"])).is_some());

        abilities.remove_startup_abilities();
        abilities.grant_startup_abilities();
        assert!(abilities.cooldown_remaining(&tags(&["Cooldown"])).is_none());
        assert!(abilities.activate_by_tags_detailed(&tags(&["Defense"]), true, AUTHORITY)
            .failures
            .is_empty());
    }

    #[test]
    fn can_activate_matches_activation_checks() {
        let mut abilities = granted(vec![
            AbilityDef::new("Fireball", tags(&["Fire"])).with_cooldown(tag("Cooldown.Fire"), 2.0),
            AbilityDef::new("Meteor", tags(&["Fire.Heavy"])).with_required_level(3),
        ]);

        assert_eq!(abilities.can_activate(AbilityHandle(0), AUTHORITY), Ok(()));
        assert!(matches!(
            abilities.can_activate(AbilityHandle(1), AUTHORITY),
            Err(ActivationFailure::LevelTooLow { required: 3, level: 1 })
        ));
        assert_eq!(
            abilities.can_activate(AbilityHandle(7), AUTHORITY),
            Err(ActivationFailure::NotGranted(AbilityHandle(7)))
        );

        abilities.activate_handle(AbilityHandle(0), AUTHORITY).unwrap();
        assert_eq!(
            abilities.can_activate(AbilityHandle(0), AUTHORITY),
            Err(ActivationFailure::AlreadyActive)
        );
        abilities.cancel_all();
        assert!(matches!(
            abilities.can_activate(AbilityHandle(0), AUTHORITY),
            Err(ActivationFailure::OnCooldown { .. })
        ));
    }

    #[test]
    fn rejects_oversized_grant_list() {
        let defs = (0..=GameConfig::MAX_ABILITIES)
            .map(|i| Arc::new(AbilityDef::new(format!("a{i}"), tags(&["Filler"]))));
        assert_eq!(
            AbilityOrchestrator::new(defs).unwrap_err(),
            AbilityError::TooManyGrants {
                count: GameConfig::MAX_ABILITIES + 1,
                max: GameConfig::MAX_ABILITIES,
            }
        );
    }
}
