//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), tick_rate = config.tick_rate, "game config loaded");
        Ok(config)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_rate == 0 {
            anyhow::bail!("tick_rate must be positive");
        }
        if config.sync_interval_ticks == 0 {
            anyhow::bail!("sync_interval_ticks must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "score_limit = 3\nrespawn_delay = 1.5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.score_limit, 3);
        assert_eq!(config.respawn_delay, 1.5);
        assert_eq!(config.tick_rate, GameConfig::DEFAULT_TICK_RATE);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let error = ConfigLoader::parse("tick_rate = 0").unwrap_err();
        assert!(error.to_string().contains("tick_rate"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("absent.toml"));
    }
}
