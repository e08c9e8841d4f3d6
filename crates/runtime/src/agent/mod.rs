//! Autonomous agent control.
//!
//! # Architecture
//!
//! ```text
//! AgentScheduler ──(each frame, registration order)──> AgentController
//!                                                         │ on_tick
//!                                                         ▼
//!                                                  BehaviorPolicy::decide
//!                                                         │ writes
//!                                                         ▼
//!                                                  AgentContext.intents
//! ```
//!
//! Controllers only ever emit [`game_core::Intent`]s. The simulation dispatches
//! them through the same path as player input.

mod context;
mod controller;
pub mod nodes;
mod policy;
pub mod presets;
mod scheduler;

pub use context::{AgentContext, PawnView, TargetView};
pub use controller::{AgentController, AgentState};
pub use policy::{BehaviorPolicy, BehaviorTree, TreePolicy};
pub use scheduler::AgentScheduler;
