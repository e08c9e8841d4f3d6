//! Gameplay events recorded by the simulation.
//!
//! Events are appended while a step runs and drained by the embedder
//! (logging, UI, tests) afterwards.

mod game_event;
mod log;

pub use game_event::GameEvent;
pub use log::EventLog;
