//! Unified error types surfaced by the simulation API.
use game_core::{CatalogError, EntityId, Role, SpawnError};
use thiserror::Error;

use crate::replication::CodecError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("{operation} requires the {expected} role, simulation is {actual}")]
    WrongRole {
        operation: &'static str,
        expected: Role,
        actual: Role,
    },

    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to spawn `{name}`")]
    Spawn {
        name: String,
        #[source]
        source: SpawnError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
