//! Requests issued by input sources and autonomous agents.

use crate::ability::TagContainer;
use crate::state::EntityId;

/// A single request against the pawn a controller possesses.
///
/// Player input and agent policies produce the same intents; the simulation
/// dispatches both through one path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Forward axis input in `[-1, 1]`. Zero is ignored.
    MoveForward(f32),
    /// Strafe axis input in `[-1, 1]`. Zero is ignored.
    MoveRight(f32),
    Jump,
    StopJumping,
    ActivateTags {
        tags: TagContainer,
        allow_remote: bool,
    },
    /// Pulls the trigger of the held item.
    Shoot { target: Option<EntityId> },
    /// Direct damage from the issuing pawn to `target`.
    ApplyDamage { target: EntityId, amount: f32 },
}

impl Intent {
    pub fn activate(tags: TagContainer) -> Self {
        Self::ActivateTags {
            tags,
            allow_remote: true,
        }
    }

    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::MoveForward(_) | Self::MoveRight(_) | Self::Jump | Self::StopJumping
        )
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MoveForward(_) => "move_forward",
            Self::MoveRight(_) => "move_right",
            Self::Jump => "jump",
            Self::StopJumping => "stop_jumping",
            Self::ActivateTags { .. } => "activate_tags",
            Self::Shoot { .. } => "shoot",
            Self::ApplyDamage { .. } => "apply_damage",
        }
    }
}
