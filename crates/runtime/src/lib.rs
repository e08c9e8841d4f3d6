//! Runtime for the arena gameplay core.
//!
//! The [`Simulation`] steps characters, agents, and match rules for one
//! network role. Modules are organized by responsibility:
//! - [`simulation`] hosts the frame loop and builder
//! - [`agent`] drives pawns from behavior-tree policies
//! - [`coordinator`] keeps score and schedules respawns
//! - [`replication`] encodes authority state and observer requests
//! - [`world`] abstracts held items and movement
//! - [`events`] records what happened during a step
pub mod agent;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod replication;
pub mod simulation;
pub mod world;

mod dispatch;

pub use agent::{
    AgentContext, AgentController, AgentScheduler, AgentState, BehaviorPolicy, BehaviorTree,
    TreePolicy,
};
pub use coordinator::{ArenaCoordinator, ArenaRules, ScoreBoard};
pub use error::{Result, RuntimeError};
pub use events::{EventLog, GameEvent};
pub use replication::{ClientPacket, LinkStats, RemoteActivation, ReplicationLink, ServerPacket};
pub use simulation::{Simulation, SimulationBuilder};
pub use world::{Armory, MoveAxis, MovementInput, MovementLog, MovementService, Shot, WorldService};
