use behavior_tree::{Behavior, Status};
use game_core::{Intent, TagContainer};

use crate::agent::AgentContext;

/// Requests activation of every granted ability matching `tags`.
pub struct ActivateAbilities {
    pub tags: TagContainer,
}

impl Behavior<AgentContext> for ActivateAbilities {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.push_intent(Intent::activate(self.tags.clone()));
        Status::Success
    }
}

/// Fires the held item at the preferred target.
pub struct ShootTarget;

impl Behavior<AgentContext> for ShootTarget {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        if !ctx.pawn.has_item {
            return Status::Failure;
        }
        let Some(target) = ctx.preferred_target() else {
            return Status::Failure;
        };

        ctx.push_intent(Intent::Shoot {
            target: Some(target.entity),
        });
        Status::Success
    }
}

/// Pushes forward-axis input.
pub struct Advance {
    pub value: f32,
}

impl Behavior<AgentContext> for Advance {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.push_intent(Intent::MoveForward(self.value));
        Status::Success
    }
}

/// Pushes strafe-axis input.
pub struct Strafe {
    pub value: f32,
}

impl Behavior<AgentContext> for Strafe {
    fn tick(&self, ctx: &mut AgentContext) -> Status {
        ctx.push_intent(Intent::MoveRight(self.value));
        Status::Success
    }
}

/// Does nothing and keeps running.
pub struct Idle;

impl Behavior<AgentContext> for Idle {
    fn tick(&self, _ctx: &mut AgentContext) -> Status {
        Status::Running
    }
}
