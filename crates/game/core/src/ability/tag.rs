//! Hierarchical gameplay tags.
//!
//! A tag is a dotted label such as `Ability.Fire.Bolt`. Queries are
//! hierarchical: a tag matches a query tag when it is equal to it or one of its
//! descendants, so `Ability.Fire.Bolt` matches `Ability.Fire` but
//! `Ability.Fire` does not match `Ability.Fire.Bolt`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};

/// Errors produced while parsing a tag label.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("gameplay tag label is empty")]
    Empty,

    #[error("gameplay tag `{0}` has an empty or whitespace segment")]
    Malformed(String),
}

impl GameError for TagError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "TAG_EMPTY",
            Self::Malformed(_) => "TAG_MALFORMED",
        }
    }
}

/// A validated hierarchical label.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct GameplayTag(Box<str>);

impl GameplayTag {
    pub const SEPARATOR: char = '.';

    /// Parses and validates a tag label.
    pub fn new(label: impl AsRef<str>) -> Result<Self, TagError> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(TagError::Empty);
        }

        let malformed = label
            .split(Self::SEPARATOR)
            .any(|segment| segment.is_empty() || segment.chars().any(char::is_whitespace));
        if malformed {
            return Err(TagError::Malformed(label.to_owned()));
        }

        Ok(Self(label.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this tag equals `query` or is nested below it.
    pub fn matches(&self, query: &GameplayTag) -> bool {
        let (tag, query) = (self.as_str(), query.as_str());
        match tag.strip_prefix(query) {
            Some("") => true,
            Some(rest) => rest.starts_with(Self::SEPARATOR),
            None => false,
        }
    }

    /// Returns the enclosing tag, or `None` for a root tag.
    pub fn parent(&self) -> Option<GameplayTag> {
        self.0
            .rsplit_once(Self::SEPARATOR)
            .map(|(parent, _)| Self(parent.into()))
    }

    /// Number of segments in the label (`Ability.Fire` has depth 2).
    pub fn depth(&self) -> usize {
        self.0.split(Self::SEPARATOR).count()
    }
}

impl fmt::Display for GameplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GameplayTag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for GameplayTag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GameplayTag> for String {
    fn from(tag: GameplayTag) -> Self {
        tag.0.into()
    }
}

/// Ordered, de-duplicated set of gameplay tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<GameplayTag>", into = "Vec<GameplayTag>")
)]
pub struct TagContainer {
    tags: Vec<GameplayTag>,
}

impl TagContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every label, failing on the first invalid one.
    pub fn parse<I, S>(labels: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().map(GameplayTag::new).collect()
    }

    /// Inserts a tag, returning false if it was already present.
    pub fn insert(&mut self, tag: GameplayTag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    #[must_use]
    pub fn with(mut self, tag: GameplayTag) -> Self {
        self.insert(tag);
        self
    }

    /// Exact membership, without hierarchy.
    pub fn contains(&self, tag: &GameplayTag) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true if any tag in this container matches `query`.
    pub fn has_tag(&self, query: &GameplayTag) -> bool {
        self.tags.iter().any(|tag| tag.matches(query))
    }

    /// Returns true if any tag in this container matches any tag in `query`.
    ///
    /// An empty query matches nothing.
    pub fn has_any(&self, query: &TagContainer) -> bool {
        query.iter().any(|q| self.has_tag(q))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameplayTag> + '_ {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<GameplayTag> for TagContainer {
    fn from_iter<T: IntoIterator<Item = GameplayTag>>(iter: T) -> Self {
        let mut container = Self::new();
        for tag in iter {
            container.insert(tag);
        }
        container
    }
}

impl From<GameplayTag> for TagContainer {
    fn from(tag: GameplayTag) -> Self {
        Self { tags: vec![tag] }
    }
}

impl From<Vec<GameplayTag>> for TagContainer {
    fn from(tags: Vec<GameplayTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagContainer> for Vec<GameplayTag> {
    fn from(container: TagContainer) -> Self {
        container.tags
    }
}

impl fmt::Display for TagContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str("}")
    }
}
