//! Gameplay state of networked action characters.
//!
//! `game-core` defines the character rules (health and death, tag-driven
//! abilities, server-authoritative replicated fields) as pure, synchronous
//! APIs. The runtime drives them once per simulation tick; content tooling and
//! tests use them directly. Match-level consequences of a death are delegated
//! to a [`MatchCoordinator`] injected at spawn.
pub mod ability;
pub mod character;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod intent;
pub mod replication;
pub mod state;
pub mod vitals;

pub use ability::{
    AbilityCatalog, AbilityDef, AbilityError, AbilityHandle, AbilityInstance, AbilityOrchestrator,
    Activation, ActivationContext, ActivationFailure, ActivationReport, CatalogError,
    CooldownRemaining, CooldownSpec, CooldownTable, GameplayTag, InstanceId, NetExecution,
    TagContainer, TagError,
};
pub use character::{AbilityHost, Character, Damageable, HeldItem, Replicable, SpawnError};
pub use config::{CharacterTemplate, GameConfig, PolicyKind};
pub use coordinator::{KillReport, MatchCoordinator, NullCoordinator};
pub use error::{ErrorSeverity, GameError};
pub use intent::Intent;
pub use replication::{
    AuthorityError, AuthoritySyncState, FieldValue, Replicated, ReplicatedFields,
    ReplicationSnapshot,
};
pub use state::{ControllerId, EntityId, ItemHandle, Role};
pub use vitals::{DamageOutcome, VitalityLedger, VitalsError};
