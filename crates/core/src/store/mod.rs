//! Rhyme candidates waiting for a partner, keyed by rhyme.

pub mod repository;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::language::normalize;
use crate::types::{RhymeKey, RhymePair};

pub use repository::{JsonFileRepository, MatchRepository, NullRepository};

/// Rhyme key → most recent title seen with that key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchStore {
    entries: BTreeMap<RhymeKey, String>,
}

/// What happened when a title was offered to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// No title had this key yet; the new one now waits for a partner.
    Stored,
    /// The waiting title ends in the same word; the new one was dropped.
    SameFinalWord { existing: String },
    /// A partner was waiting. Its entry has been removed.
    Matched(RhymePair),
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &RhymeKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite; returns the previous title for the key.
    pub fn insert(&mut self, key: RhymeKey, title: impl Into<String>) -> Option<String> {
        self.entries.insert(key, title.into())
    }

    pub fn remove(&mut self, key: &RhymeKey) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RhymeKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Offer a metered title with its rhyme key.
    ///
    /// A title never pairs with one ending in the same word, since every
    /// word rhymes with itself.
    pub fn offer(&mut self, key: RhymeKey, title: &str) -> Offer {
        let Some(existing) = self.entries.get(&key) else {
            self.entries.insert(key, title.to_string());
            return Offer::Stored;
        };
        if same_final_word(existing, title) {
            return Offer::SameFinalWord {
                existing: existing.clone(),
            };
        }
        let first = self.entries.remove(&key).unwrap_or_default();
        Offer::Matched(RhymePair {
            first,
            second: title.to_string(),
            key,
        })
    }
}

/// Case-insensitive comparison of the last word of two titles.
pub fn same_final_word(a: &str, b: &str) -> bool {
    normalize::final_word(a) == normalize::final_word(b)
}

impl FromIterator<(RhymeKey, String)> for MatchStore {
    fn from_iter<I: IntoIterator<Item = (RhymeKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> RhymeKey {
        RhymeKey::new("AA1 R")
    }

    #[test]
    fn test_offer_new_key_is_stored() {
        let mut store = MatchStore::new();
        assert_eq!(store.offer(key(), "Pedro, Marshal of Navarre"), Offer::Stored);
        assert_eq!(store.get(&key()), Some("Pedro, Marshal of Navarre"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_offer_same_final_word_keeps_original() {
        let mut store = MatchStore::new();
        store.offer(key(), "Pedro, Marshal of Navarre");
        let offer = store.offer(key(), "Tortured Marshal of NAVARRE");
        assert_eq!(
            offer,
            Offer::SameFinalWord {
                existing: "Pedro, Marshal of Navarre".into()
            }
        );
        assert_eq!(store.get(&key()), Some("Pedro, Marshal of Navarre"));
    }

    #[test]
    fn test_offer_different_final_word_matches() {
        let mut store = MatchStore::new();
        store.offer(key(), "Pedro, Marshal of Navarre");
        let offer = store.offer(key(), "Savage 2: A Tortured Star");
        assert_eq!(
            offer,
            Offer::Matched(RhymePair {
                first: "Pedro, Marshal of Navarre".into(),
                second: "Savage 2: A Tortured Star".into(),
                key: key(),
            })
        );
        assert!(store.get(&key()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_other_keys_untouched_by_match() {
        let mut store = MatchStore::new();
        store.offer(RhymeKey::new("OW1 L"), "Savage 2: A Tortured Soul");
        store.offer(key(), "Pedro, Marshal of Navarre");
        store.offer(key(), "Savage 2: A Tortured Star");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&RhymeKey::new("OW1 L")), Some("Savage 2: A Tortured Soul"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut store = MatchStore::new();
        assert_eq!(store.insert(key(), "a"), None);
        assert_eq!(store.insert(key(), "b"), Some("a".into()));
        assert_eq!(store.remove(&key()), Some("b".into()));
        assert_eq!(store.remove(&key()), None);
    }

    #[test]
    fn test_same_final_word() {
        assert!(same_final_word("Pedro, Marshal of Navarre", "Kings of navarre."));
        assert!(!same_final_word("Pedro, Marshal of Navarre", "A Tortured Star"));
        assert!(same_final_word("", ""));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let store: MatchStore = [(key(), "Pedro, Marshal of Navarre".to_string())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"AA1 R":"Pedro, Marshal of Navarre"}"#);
        let back: MatchStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}
