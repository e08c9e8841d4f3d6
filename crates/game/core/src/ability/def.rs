//! Ability definitions (the "class" an ability instance is created from).

use super::tag::{GameplayTag, TagContainer};

/// Where an ability is allowed to run when requested from an observer.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NetExecution {
    /// Runs immediately on whichever role requests it.
    #[default]
    LocalPredicted,
    /// Runs only on the authority; observers must request it remotely.
    ServerOnly,
}

/// Cooldown started when an ability activates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownSpec {
    pub tag: GameplayTag,
    /// Seconds.
    pub duration: f32,
}

/// Static description of a grantable ability.
///
/// Definitions are immutable once granted and shared between the grant list
/// and every instance spawned from them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDef {
    pub name: String,

    /// Tags used for activation-by-tag and active-ability queries.
    pub tags: TagContainer,

    /// Minimum character level needed to activate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_level: i32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: Option<CooldownSpec>,

    /// Seconds until the instance completes on its own. `None` runs until it
    /// is ended or cancelled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<f32>,

    /// Active abilities matching these tags are cancelled when this one starts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cancels: TagContainer,

    #[cfg_attr(feature = "serde", serde(default))]
    pub net_execution: NetExecution,
}

impl AbilityDef {
    pub fn new(name: impl Into<String>, tags: TagContainer) -> Self {
        Self {
            name: name.into(),
            tags,
            required_level: 0,
            cooldown: None,
            duration: None,
            cancels: TagContainer::new(),
            net_execution: NetExecution::LocalPredicted,
        }
    }

    #[must_use]
    pub fn with_required_level(mut self, level: i32) -> Self {
        self.required_level = level;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, tag: GameplayTag, duration: f32) -> Self {
        self.cooldown = Some(CooldownSpec { tag, duration });
        self
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub fn cancelling(mut self, tags: TagContainer) -> Self {
        self.cancels = tags;
        self
    }

    #[must_use]
    pub fn server_only(mut self) -> Self {
        self.net_execution = NetExecution::ServerOnly;
        self
    }
}
