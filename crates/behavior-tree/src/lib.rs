//! Frame-driven behavior tree library for real-time game agents.
//!
//! Trees are re-evaluated from the root on every frame. Nodes keep no
//! per-agent memory, so one tree can be shared by any number of agents and a
//! higher-priority branch can pre-empt a running one on the next frame.
//!
//! - **Running state**: long actions report [`Status::Running`] until done
//! - **Stateless nodes**: all mutable state lives in the context `C`
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure, or Running
//! - Composite nodes: [`Sequence`], [`Selector`], [`UtilitySelector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - Leaf adapters: [`Condition`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{ScoredOption, Selector, Sequence, UtilitySelector, scored};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Condition};
pub use status::Status;
