use game_core::{EntityId, InstanceId};
use serde::{Deserialize, Serialize};

/// High-level occurrences produced by a simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An entity lost health.
    Damaged {
        entity: EntityId,
        source: Option<EntityId>,
        amount: f32,
        health_before: f32,
        health_after: f32,
    },

    /// An entity's health reached zero.
    Killed {
        victim: EntityId,
        killer: Option<EntityId>,
    },

    AbilityActivated {
        entity: EntityId,
        ability: String,
        instance: InstanceId,
    },

    /// An ability instance left the active set.
    AbilityEnded {
        entity: EntityId,
        instance: InstanceId,
        cancelled: bool,
    },

    /// The replicated character level changed (written on the authority,
    /// applied on an observer).
    LevelChanged { entity: EntityId, level: i32 },

    Respawned { entity: EntityId },

    MatchEnded { winner: EntityId, kills: u32 },
}

impl GameEvent {
    /// The entity this event is primarily about.
    pub fn entity(&self) -> EntityId {
        match self {
            Self::Damaged { entity, .. }
            | Self::AbilityActivated { entity, .. }
            | Self::AbilityEnded { entity, .. }
            | Self::LevelChanged { entity, .. }
            | Self::Respawned { entity } => *entity,
            Self::Killed { victim, .. } => *victim,
            Self::MatchEnded { winner, .. } => *winner,
        }
    }
}
