use crate::state::{EntityId, ItemHandle};

/// An item spawned by the world service and attached to a character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeldItem {
    pub handle: ItemHandle,
    pub name: String,
    /// Attachment point on the owner's mesh.
    pub socket: String,
    /// Back reference to the holder; the item never owns the character.
    pub owner: EntityId,
}

impl HeldItem {
    pub const WEAPON_SOCKET: &'static str = "WeaponSocket";

    pub fn weapon(handle: ItemHandle, name: impl Into<String>, owner: EntityId) -> Self {
        Self {
            handle,
            name: name.into(),
            socket: Self::WEAPON_SOCKET.to_owned(),
            owner,
        }
    }
}
