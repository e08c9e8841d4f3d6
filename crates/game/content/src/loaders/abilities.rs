//! Ability catalog loader.

use std::path::Path;

use game_core::{AbilityCatalog, AbilityDef};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityFile {
    pub abilities: Vec<AbilityDef>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    ///
    /// Ability names must be unique.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        debug!(path = %path.display(), count = catalog.len(), "ability catalog loaded");
        Ok(catalog)
    }

    /// Parse the ability catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        let file: AbilityFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        AbilityCatalog::from_defs(file.abilities)
            .map_err(|e| anyhow::anyhow!("Invalid ability catalog: {}", e))
    }
}
