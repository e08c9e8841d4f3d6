//! Identifiers and role markers shared by every gameplay component.
//!
//! Entities are referenced by [`EntityId`] across component boundaries; no
//! component keeps an owning pointer to another entity.
mod common;

pub use common::{ControllerId, EntityId, ItemHandle, Role};
