use tracing::{debug, warn};

use super::field::Replicated;
use super::fields::ReplicatedFields;
use super::snapshot::{FieldValue, ReplicationSnapshot};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Role};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthorityError {
    #[error("{entity} cannot write {field:?} as {role}")]
    NotAuthority {
        entity: EntityId,
        role: Role,
        field: ReplicatedFields,
    },
}

impl GameError for AuthorityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "AUTHORITY_NOT_AUTHORITY"
    }
}

/// Replicated state of one character, as seen by one simulation role.
#[derive(Clone, Debug)]
pub struct AuthoritySyncState {
    entity: EntityId,
    role: Role,
    character_level: Replicated<i32>,
}

impl AuthoritySyncState {
    pub fn new(entity: EntityId, role: Role, character_level: i32) -> Self {
        Self {
            entity,
            role,
            character_level: Replicated::new(character_level),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn character_level(&self) -> i32 {
        *self.character_level.get()
    }

    /// Sets the character level. Only the authority may write it.
    pub fn try_set_character_level(&mut self, level: i32) -> Result<(), AuthorityError> {
        if !self.role.is_authority() {
            return Err(AuthorityError::NotAuthority {
                entity: self.entity,
                role: self.role,
                field: ReplicatedFields::CHARACTER_LEVEL,
            });
        }
        if self.character_level.set(level) {
            debug!(entity = %self.entity, level, "character level changed");
        }
        Ok(())
    }

    /// Sets the character level, returning false (and logging) on observers.
    pub fn set_character_level(&mut self, level: i32) -> bool {
        match self.try_set_character_level(level) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, requested = level, "rejected replicated write");
                false
            }
        }
    }

    pub fn dirty_fields(&self) -> ReplicatedFields {
        let mut fields = ReplicatedFields::empty();
        if self.character_level.is_dirty() {
            fields |= ReplicatedFields::CHARACTER_LEVEL;
        }
        fields
    }

    /// Drains dirty fields into a snapshot. Authority only.
    pub fn collect_snapshot(&mut self) -> Option<ReplicationSnapshot> {
        if !self.role.is_authority() || self.dirty_fields().is_empty() {
            return None;
        }

        let mut values = Vec::new();
        if self.character_level.is_dirty() {
            values.push(FieldValue::CharacterLevel(self.character_level()));
            self.character_level.clear_dirty();
        }

        Some(ReplicationSnapshot {
            entity: self.entity,
            full: false,
            values,
        })
    }

    /// Every replicated field regardless of dirtiness. Authority only.
    pub fn full_snapshot(&self) -> Option<ReplicationSnapshot> {
        if !self.role.is_authority() {
            return None;
        }

        Some(ReplicationSnapshot {
            entity: self.entity,
            full: true,
            values: vec![FieldValue::CharacterLevel(self.character_level())],
        })
    }

    /// Applies an authority snapshot. Observer only; last writer wins.
    pub fn apply_snapshot(&mut self, snapshot: &ReplicationSnapshot) -> bool {
        if self.role.is_authority() || snapshot.entity != self.entity {
            debug!(
                entity = %self.entity,
                snapshot_entity = %snapshot.entity,
                role = %self.role,
                "ignored replication snapshot"
            );
            return false;
        }

        for value in &snapshot.values {
            match *value {
                FieldValue::CharacterLevel(level) => self.character_level.overwrite(level),
            }
        }
        true
    }
}
