//! Cooldown bookkeeping keyed by gameplay tag.

use std::collections::BTreeMap;

use super::tag::{GameplayTag, TagContainer};

/// Remaining and total time of a running cooldown, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownRemaining {
    pub remaining: f32,
    pub duration: f32,
}

/// Running cooldowns, one per tag.
#[derive(Clone, Debug, Default)]
pub struct CooldownTable {
    entries: BTreeMap<GameplayTag, CooldownRemaining>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the cooldown for `tag`.
    ///
    /// Non-positive and non-finite durations are ignored.
    pub fn start(&mut self, tag: GameplayTag, duration: f32) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.entries.insert(
            tag,
            CooldownRemaining {
                remaining: duration,
                duration,
            },
        );
    }

    /// Exact lookup of the cooldown registered under `tag`.
    pub fn get(&self, tag: &GameplayTag) -> Option<CooldownRemaining> {
        self.entries.get(tag).copied()
    }

    /// Returns the binding cooldown among all entries matching `query`.
    ///
    /// The entry with the largest remaining time wins; ties go to the longest
    /// total duration. Returns `None` when no entry matches.
    pub fn remaining(&self, query: &TagContainer) -> Option<CooldownRemaining> {
        self.entries
            .iter()
            .filter(|(tag, _)| query.iter().any(|q| tag.matches(q)))
            .map(|(_, entry)| *entry)
            .max_by(|a, b| {
                a.remaining
                    .total_cmp(&b.remaining)
                    .then(a.duration.total_cmp(&b.duration))
            })
    }

    /// Advances every cooldown by `dt` seconds and returns the tags that expired.
    pub fn tick(&mut self, dt: f32) -> Vec<GameplayTag> {
        let mut expired = Vec::new();
        self.entries.retain(|tag, entry| {
            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                expired.push(tag.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
