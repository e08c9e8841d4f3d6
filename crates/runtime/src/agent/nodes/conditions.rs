use behavior_tree::{Behavior, Status};
use game_core::TagContainer;

use crate::agent::AgentContext;

/// Succeeds when any other character is in play.
pub struct HasTarget;

impl Behavior<AgentContext> for HasTarget {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        (!ctx.targets.is_empty()).into()
    }
}

/// Checks if the pawn's health is below a threshold.
pub struct IsHealthLow {
    /// Health ratio threshold (0.0 to 1.0).
    ///
    /// Returns Success if `health / max_health < threshold`.
    pub threshold: f32,
}

impl Behavior<AgentContext> for IsHealthLow {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        (ctx.pawn.health_fraction < self.threshold).into()
    }
}

/// Succeeds when no running cooldown matches `tags`.
pub struct CooldownReady {
    pub tags: TagContainer,
}

impl Behavior<AgentContext> for CooldownReady {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.pawn.cooldowns.remaining(&self.tags).is_none().into()
    }
}

/// Succeeds when a granted ability matching `tags` could activate now.
pub struct AbilityReady {
    pub tags: TagContainer,
}

impl Behavior<AgentContext> for AbilityReady {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.pawn.ready_tags.has_any(&self.tags).into()
    }
}

/// Succeeds while an ability matching `tags` is running.
pub struct IsAbilityActive {
    pub tags: TagContainer,
}

impl Behavior<AgentContext> for IsAbilityActive {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.pawn.active_tags.has_any(&self.tags).into()
    }
}
