use std::fmt;

use serde::{Deserialize, Serialize};

/// Stress digits for one word, or a marker that the word could not be
/// resolved and must disqualify whatever title contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stress {
    /// One digit per syllable: 0 unstressed, 1 primary, 2 secondary.
    Resolved(String),
    Unresolvable,
}

impl Stress {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Stress::Resolved(_))
    }
}

/// Canonical rhyming suffix of a word's pronunciation, e.g. `"AA1 R"`.
///
/// Two titles rhyme iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RhymeKey(String);

impl RhymeKey {
    pub fn new(phones: impl Into<String>) -> Self {
        Self(phones.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RhymeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RhymeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Two titles that rhyme on different final words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymePair {
    /// The title that had been waiting in the store.
    pub first: String,
    /// The title that completed the pair.
    pub second: String,
    pub key: RhymeKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_resolved() {
        assert!(Stress::Resolved("10".into()).is_resolved());
        assert!(!Stress::Unresolvable.is_resolved());
    }

    #[test]
    fn test_rhyme_key_display() {
        let key = RhymeKey::new("AA1 R");
        assert_eq!(key.to_string(), "AA1 R");
        assert_eq!(key.as_str(), "AA1 R");
        assert_eq!(key, RhymeKey::from("AA1 R"));
    }

    #[test]
    fn test_rhyme_key_serializes_as_plain_string() {
        let key = RhymeKey::new("OW1 L");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"OW1 L\"");
    }

    #[test]
    fn test_pair_creation() {
        let pair = RhymePair {
            first: "Pedro, Marshal of Navarre".into(),
            second: "Somebody's Guitar".into(),
            key: RhymeKey::new("AA1 R"),
        };
        assert_eq!(pair.first, "Pedro, Marshal of Navarre");
        assert_eq!(pair.key.as_str(), "AA1 R");
    }
}
