/// Simulation-wide tunables and compile-time capacities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Fixed simulation steps per second.
    pub tick_rate: u32,
    /// Dirty replicated fields are collected every this many ticks.
    pub sync_interval_ticks: u32,
    /// Every replicated field is resent every this many ticks (0 disables).
    pub full_snapshot_interval_ticks: u32,
    pub respawn_enabled: bool,
    /// Seconds between death and respawn.
    pub respawn_delay: f32,
    /// Kills needed to end the match (0 = no limit).
    pub score_limit: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITIES: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_RATE: u32 = 60;
    pub const DEFAULT_SYNC_INTERVAL_TICKS: u32 = 1;
    pub const DEFAULT_FULL_SNAPSHOT_INTERVAL_TICKS: u32 = 30;
    pub const DEFAULT_RESPAWN_DELAY: f32 = 3.0;
    pub const DEFAULT_SCORE_LIMIT: u32 = 10;

    pub fn new() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
            sync_interval_ticks: Self::DEFAULT_SYNC_INTERVAL_TICKS,
            full_snapshot_interval_ticks: Self::DEFAULT_FULL_SNAPSHOT_INTERVAL_TICKS,
            respawn_enabled: true,
            respawn_delay: Self::DEFAULT_RESPAWN_DELAY,
            score_limit: Self::DEFAULT_SCORE_LIMIT,
        }
    }

    /// Seconds per fixed step.
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Behavior preset an autonomous agent is driven by.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PolicyKind {
    /// Shoots the nearest living target.
    Gunner,
    /// Casts abilities when off cooldown, shoots otherwise.
    Caster,
    /// Stands still.
    Dummy,
}

/// Spawn parameters for one character archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "CharacterTemplate::default_max_health"))]
    pub max_health: f32,
    #[cfg_attr(feature = "serde", serde(default = "CharacterTemplate::default_level"))]
    pub character_level: i32,
    /// Ability names resolved against the catalog at spawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub held_item: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: Option<PolicyKind>,
}

impl CharacterTemplate {
    pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_health: Self::DEFAULT_MAX_HEALTH,
            character_level: 1,
            abilities: Vec::new(),
            held_item: None,
            policy: None,
        }
    }

    #[must_use]
    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: i32) -> Self {
        self.character_level = level;
        self
    }

    #[must_use]
    pub fn with_abilities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_held_item(mut self, item: impl Into<String>) -> Self {
        self.held_item = Some(item.into());
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = Some(policy);
        self
    }

    #[cfg(feature = "serde")]
    fn default_max_health() -> f32 {
        Self::DEFAULT_MAX_HEALTH
    }

    #[cfg(feature = "serde")]
    fn default_level() -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delta_follows_tick_rate() {
        let config = GameConfig {
            tick_rate: 50,
            ..GameConfig::default()
        };
        assert_eq!(config.fixed_delta(), 0.02);

        let degenerate = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };
        assert_eq!(degenerate.fixed_delta(), 1.0);
    }

    #[test]
    fn policy_kind_parses_case_insensitively() {
        assert_eq!("Gunner".parse::<PolicyKind>().unwrap(), PolicyKind::Gunner);
        assert_eq!(PolicyKind::Caster.to_string(), "caster");
    }
}
