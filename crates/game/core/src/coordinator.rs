//! Match-level extension point notified when a character dies.

use crate::state::EntityId;

/// Who died, and who is credited with the kill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillReport {
    pub victim: EntityId,
    /// `None` for environmental or unattributed damage.
    pub killer: Option<EntityId>,
}

/// Receives death notifications and decides their match consequences
/// (respawn, scoring, ending the match).
///
/// Called at most once per entity per life, after the victim's health has
/// already reached its terminal state. Implementations must not call back into
/// the victim's ledger.
pub trait MatchCoordinator: Send + Sync {
    fn on_entity_killed(&self, report: &KillReport);
}

/// Coordinator that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCoordinator;

impl MatchCoordinator for NullCoordinator {
    fn on_entity_killed(&self, _report: &KillReport) {}
}
