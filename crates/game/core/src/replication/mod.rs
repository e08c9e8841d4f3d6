//! Server-authoritative replicated fields.
//!
//! The authority is the single writer of replicated state. It collects dirty
//! fields into [`ReplicationSnapshot`]s; observers apply them last-writer-wins.
//! Snapshots may be resent (periodic full snapshots) and applying one twice is
//! harmless.

mod field;
mod fields;
mod snapshot;
mod sync;

pub use field::Replicated;
pub use fields::ReplicatedFields;
pub use snapshot::{FieldValue, ReplicationSnapshot};
pub use sync::{AuthorityError, AuthoritySyncState};
