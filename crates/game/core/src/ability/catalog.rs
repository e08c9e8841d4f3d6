use std::collections::BTreeMap;
use std::sync::Arc;

use super::def::AbilityDef;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("ability `{0}` is defined more than once")]
    Duplicate(String),

    #[error("unknown ability `{0}`")]
    UnknownAbility(String),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "CATALOG_DUPLICATE",
            Self::UnknownAbility(_) => "CATALOG_UNKNOWN_ABILITY",
        }
    }
}

/// Ability definitions indexed by name.
///
/// Definitions are shared (`Arc`) so every character granted the same ability
/// points at one immutable definition.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    defs: BTreeMap<String, Arc<AbilityDef>>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_defs<I>(defs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = AbilityDef>,
    {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, def: AbilityDef) -> Result<(), CatalogError> {
        if self.defs.contains_key(&def.name) {
            return Err(CatalogError::Duplicate(def.name));
        }
        self.defs.insert(def.name.clone(), Arc::new(def));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<AbilityDef>> {
        self.defs.get(name).cloned()
    }

    /// Resolves a grant list by name, preserving order.
    pub fn resolve<I, S>(&self, names: I) -> Result<Vec<Arc<AbilityDef>>, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .ok_or_else(|| CatalogError::UnknownAbility(name.to_owned()))
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.defs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::TagContainer;

    fn def(name: &str) -> AbilityDef {
        AbilityDef::new(name, TagContainer::parse([name]).unwrap())
    }

    #[test]
    fn resolve_keeps_requested_order() {
        let catalog = AbilityCatalog::from_defs([def("Fire"), def("Ice")]).unwrap();
        let resolved = catalog.resolve(["Ice", "Fire"]).unwrap();
        assert_eq!(resolved[0].name, "Ice");
        assert_eq!(resolved[1].name, "Fire");
    }

    #[test]
    fn unknown_and_duplicate_names_fail() {
        assert_eq!(
            AbilityCatalog::from_defs([def("Fire"), def("Fire")]).unwrap_err(),
            CatalogError::Duplicate("Fire".into())
        );

        let catalog = AbilityCatalog::from_defs([def("Fire")]).unwrap();
        assert_eq!(
            catalog.resolve(["Lightning"]).unwrap_err(),
            CatalogError::UnknownAbility("Lightning".into())
        );
    }
}
