//! Headless client configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one headless bot match.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Directory holding `game.toml`, `abilities.ron`, and `roster.ron`.
    /// `None` uses the content bundled with `game-content`.
    pub data_dir: Option<PathBuf>,
    /// Hard stop for matches that never reach the score limit.
    pub max_ticks: u64,
    /// Observer simulations mirroring the authority.
    pub observers: usize,
    pub score_limit: Option<u32>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            observers: 1,
            score_limit: None,
        }
    }
}

impl ArenaConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: bundled content)
    /// - `ARENA_MAX_TICKS` - Tick budget for the match (default: 18000)
    /// - `ARENA_OBSERVERS` - Number of observer replicas (default: 1)
    /// - `ARENA_SCORE_LIMIT` - Overrides `score_limit` from `game.toml`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("ARENA_DATA_DIR").ok().map(PathBuf::from);

        if let Some(ticks) = read_env::<u64>("ARENA_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }
        if let Some(observers) = read_env::<usize>("ARENA_OBSERVERS") {
            config.observers = observers;
        }
        config.score_limit = read_env::<u32>("ARENA_SCORE_LIMIT");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
