//! Tag-driven abilities.
//!
//! An [`AbilityOrchestrator`] owns one character's granted abilities, the
//! instances currently running, and the cooldowns they started. Abilities are
//! selected by [`GameplayTag`] queries rather than by name.

mod catalog;
mod cooldown;
mod def;
mod instance;
mod orchestrator;
mod tag;

pub use catalog::{AbilityCatalog, CatalogError};
pub use cooldown::{CooldownRemaining, CooldownTable};
pub use def::{AbilityDef, CooldownSpec, NetExecution};
pub use instance::{AbilityHandle, AbilityInstance, InstanceId};
pub use orchestrator::{
    AbilityError, AbilityOrchestrator, Activation, ActivationContext, ActivationFailure,
    ActivationReport,
};
pub use tag::{GameplayTag, TagContainer, TagError};
