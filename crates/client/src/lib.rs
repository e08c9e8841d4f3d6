//! Headless arena client.
//!
//! # Architecture
//!
//! ```text
//! ArenaConfig (env) ──> ContentFactory ──> ArenaContent
//!                                              │
//!                     ┌────────────────────────┴───────────────┐
//!                     ▼                                        ▼
//!          Simulation (authority) <── ReplicationLink ──> Simulation (observers)
//! ```
//!
//! The authority runs every agent; observers only mirror replicated state.

pub mod config;
pub mod session;

pub use config::ArenaConfig;
pub use session::{MatchSummary, run_match};
