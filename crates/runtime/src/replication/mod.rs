//! Wire form of replicated state and the in-process link that carries it.
//!
//! Authority → observers: [`ServerPacket`]s of field snapshots.
//! Observer → authority: [`ClientPacket`]s of remote activation requests.
//! Both are bincode-encoded; there is no transport here.

mod codec;
mod link;
mod packet;

pub use codec::{CodecError, decode, encode};
pub use link::{LinkStats, ReplicationLink};
pub use packet::{ClientPacket, RemoteActivation, ServerPacket};
