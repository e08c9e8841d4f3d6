use game_core::{AbilityHandle, EntityId, ReplicationSnapshot};
use serde::{Deserialize, Serialize};

/// Snapshots produced by the authority during one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPacket {
    pub tick: u64,
    pub snapshots: Vec<ReplicationSnapshot>,
}

/// Ability activation the observer asks the authority to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteActivation {
    pub entity: EntityId,
    pub handle: AbilityHandle,
}

/// Requests produced by an observer during one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPacket {
    pub tick: u64,
    pub requests: Vec<RemoteActivation>,
}
