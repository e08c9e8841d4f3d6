use bitflags::bitflags;

bitflags! {
    /// Which replicated fields of a character a snapshot carries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReplicatedFields: u8 {
        const CHARACTER_LEVEL = 1 << 0;
    }
}
