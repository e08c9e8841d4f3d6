use std::fmt;
use std::sync::Arc;

use super::def::AbilityDef;
use super::tag::TagContainer;

/// Stable index of an ability in a character's grant list.
///
/// Handles survive remove/grant cycles, which lets an observer name an ability
/// when asking the authority to activate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityHandle(pub u32);

impl fmt::Display for AbilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

/// Identifier of one activation, unique per orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u64);

/// A running ability owned by the character that activated it.
#[derive(Clone, Debug)]
pub struct AbilityInstance {
    id: InstanceId,
    handle: AbilityHandle,
    def: Arc<AbilityDef>,
    elapsed: f32,
}

impl AbilityInstance {
    pub(crate) fn new(id: InstanceId, handle: AbilityHandle, def: Arc<AbilityDef>) -> Self {
        Self {
            id,
            handle,
            def,
            elapsed: 0.0,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn handle(&self) -> AbilityHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn tags(&self) -> &TagContainer {
        &self.def.tags
    }

    pub fn def(&self) -> &AbilityDef {
        &self.def
    }

    /// Seconds since activation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// True once a timed ability has run for its full duration.
    pub fn is_complete(&self) -> bool {
        self.def
            .duration
            .is_some_and(|duration| self.elapsed >= duration)
    }
}
