//! Character roster loader.

use std::path::Path;

use game_core::CharacterTemplate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub characters: Vec<CharacterTemplate>,
}

/// Loader for character templates from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load character templates from a RON file, in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        let roster = Self::parse(&content)?;
        debug!(path = %path.display(), count = roster.len(), "roster loaded");
        Ok(roster)
    }

    /// Parse character templates from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<CharacterTemplate>> {
        let file: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for template in &file.characters {
            if !(template.max_health.is_finite() && template.max_health > 0.0) {
                anyhow::bail!(
                    "Character `{}` has invalid max_health {}",
                    template.name,
                    template.max_health
                );
            }
        }
        Ok(file.characters)
    }
}
