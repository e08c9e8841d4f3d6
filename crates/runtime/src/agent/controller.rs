use std::sync::Arc;

use game_core::{ControllerId, EntityId, Intent};
use tracing::{debug, trace, warn};

use super::{AgentContext, BehaviorPolicy};

/// Lifecycle of an agent controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentState {
    /// Not yet begun, without a policy, or its pawn is out of play.
    Idle,
    /// Consulting its policy every frame.
    Running,
    /// Released from its pawn. Terminal.
    Detached,
}

/// Drives one non-player pawn by consulting a behavior policy each frame.
pub struct AgentController {
    id: ControllerId,
    pawn: EntityId,
    policy: Option<Arc<dyn BehaviorPolicy>>,
    state: AgentState,
}

impl AgentController {
    pub fn new(id: ControllerId, pawn: EntityId, policy: Option<Arc<dyn BehaviorPolicy>>) -> Self {
        Self {
            id,
            pawn,
            policy,
            state: AgentState::Idle,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn pawn(&self) -> EntityId {
        self.pawn
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn policy_name(&self) -> Option<&str> {
        self.policy.as_deref().map(|policy| policy.name())
    }

    /// Starts consulting the policy. Without one the controller stays idle.
    pub fn on_begin_play(&mut self) -> AgentState {
        if self.state == AgentState::Detached {
            return self.state;
        }

        match &self.policy {
            Some(policy) => {
                debug!(controller = %self.id, pawn = %self.pawn, policy = policy.name(), "agent running");
                self.state = AgentState::Running;
            }
            None => {
                warn!(controller = %self.id, pawn = %self.pawn, "agent has no behavior policy; staying idle");
                self.state = AgentState::Idle;
            }
        }
        self.state
    }

    /// The pawn left play (died). Ticks are ignored until the next begin-play.
    pub fn on_pawn_lost(&mut self) {
        if self.state == AgentState::Running {
            self.state = AgentState::Idle;
        }
    }

    pub fn detach(&mut self) {
        self.state = AgentState::Detached;
    }

    pub fn is_detached(&self) -> bool {
        self.state == AgentState::Detached
    }

    /// Consults the policy once and returns the intents it issued.
    pub fn on_tick(&mut self, mut ctx: AgentContext) -> Vec<Intent> {
        let policy = match (self.state, &self.policy) {
            (AgentState::Running, Some(policy)) => policy,
            _ => {
                trace!(controller = %self.id, state = ?self.state, "agent tick skipped");
                return Vec::new();
            }
        };

        let status = policy.decide(&mut ctx);
        trace!(
            controller = %self.id,
            ?status,
            intents = ctx.intents().len(),
            "agent decided"
        );
        ctx.into_intents()
    }
}

impl std::fmt::Debug for AgentController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentController")
            .field("id", &self.id)
            .field("pawn", &self.pawn)
            .field("policy", &self.policy_name())
            .field("state", &self.state)
            .finish()
    }
}
