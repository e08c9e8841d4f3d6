//! Leaf nodes for agent behavior trees.
//!
//! - **Conditions** read the [`AgentContext`](crate::agent::AgentContext) and
//!   return Success or Failure without issuing intents.
//! - **Actions** push intents and report how far they got.

mod actions;
mod conditions;

pub use actions::{ActivateAbilities, Advance, Idle, ShootTarget, Strafe};
pub use conditions::{AbilityReady, CooldownReady, HasTarget, IsAbilityActive, IsHealthLow};
