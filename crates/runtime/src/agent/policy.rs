use behavior_tree::{Behavior, Status};

use super::AgentContext;

/// Behavior tree over the agent context.
pub type BehaviorTree = Box<dyn Behavior<AgentContext>>;

/// Decision procedure consulted once per frame by an agent controller.
///
/// Policies only write intents into the context; they never touch the pawn.
pub trait BehaviorPolicy: Send + Sync {
    fn name(&self) -> &str;

    fn decide(&self, ctx: &mut AgentContext) -> Status;
}

/// Policy backed by a behavior tree evaluated from the root every frame.
pub struct TreePolicy {
    name: String,
    root: BehaviorTree,
}

impl TreePolicy {
    pub fn new(name: impl Into<String>, root: BehaviorTree) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

impl BehaviorPolicy for TreePolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &mut AgentContext) -> Status {
        self.root.tick(ctx)
    }
}

impl std::fmt::Debug for TreePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreePolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
