//! Data-driven content definitions and loaders.
//!
//! This crate loads static arena content from RON/TOML data files:
//! - Game configuration (TOML)
//! - Ability catalog (RON)
//! - Character roster (RON)
//!
//! Content is consumed by the runtime at spawn time and never appears in
//! replicated state.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ArenaContent, ConfigLoader, ContentFactory, LoadResult, RosterLoader,
};
