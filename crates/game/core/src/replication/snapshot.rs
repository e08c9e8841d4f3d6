use super::fields::ReplicatedFields;
use crate::state::EntityId;

/// One replicated field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    CharacterLevel(i32),
}

impl FieldValue {
    pub fn field(&self) -> ReplicatedFields {
        match self {
            Self::CharacterLevel(_) => ReplicatedFields::CHARACTER_LEVEL,
        }
    }
}

/// Replicated field values of one entity, authority to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationSnapshot {
    pub entity: EntityId,
    /// True when every replicated field is included.
    pub full: bool,
    pub values: Vec<FieldValue>,
}

impl ReplicationSnapshot {
    pub fn fields(&self) -> ReplicatedFields {
        self.values
            .iter()
            .fold(ReplicatedFields::empty(), |acc, value| acc | value.field())
    }

    pub fn character_level(&self) -> Option<i32> {
        self.values.iter().find_map(|value| match value {
            FieldValue::CharacterLevel(level) => Some(*level),
        })
    }
}
