//! Content factory for loading all arena content from a data directory.

use std::path::{Path, PathBuf};

use game_core::{AbilityCatalog, CharacterTemplate, GameConfig};

use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult, RosterLoader};

/// Everything a match needs from data files.
#[derive(Debug, Clone)]
pub struct ArenaContent {
    pub config: GameConfig,
    pub abilities: AbilityCatalog,
    pub roster: Vec<CharacterTemplate>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// ├── abilities.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "game.toml";
    pub const ABILITIES_FILE: &'static str = "abilities.ron";
    pub const ROSTER_FILE: &'static str = "roster.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `game.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        AbilityLoader::load(&self.data_dir.join(Self::ABILITIES_FILE))
    }

    /// Load character templates from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<CharacterTemplate>> {
        RosterLoader::load(&self.data_dir.join(Self::ROSTER_FILE))
    }

    /// Load every file and check that roster abilities exist in the catalog.
    pub fn load_all(&self) -> LoadResult<ArenaContent> {
        let config = self.load_config()?;
        let abilities = self.load_abilities()?;
        let roster = self.load_roster()?;

        for template in &roster {
            abilities.resolve(&template.abilities).map_err(|e| {
                anyhow::anyhow!("Character `{}` references {}", template.name, e)
            })?;
        }

        Ok(ArenaContent {
            config,
            abilities,
            roster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_is_consistent() {
        let content = ContentFactory::bundled().load_all().unwrap();
        assert!(!content.abilities.is_empty());
        assert!(!content.roster.is_empty());
        assert!(content.roster.iter().any(|template| template.policy.is_some()));
    }

    #[test]
    fn roster_with_unknown_ability_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ContentFactory::CONFIG_FILE), "").unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::ABILITIES_FILE),
            r#"(abilities: [])"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::ROSTER_FILE),
            r#"(characters: [(name: "Wizard", abilities: ["Teleport"])])"#,
        )
        .unwrap();

        let error = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(error.to_string().contains("Wizard"));
    }
}
