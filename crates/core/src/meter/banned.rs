//! Word and phrase blocklist applied before any phonetic work.

use std::collections::HashSet;

use crate::language::normalize;

#[derive(Debug, Clone, Default)]
pub struct BannedFilter {
    words: HashSet<String>,
    phrases: Vec<String>,
}

impl BannedFilter {
    pub fn new<W, P>(words: W, phrases: P) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// True if the title contains a banned word or phrase.
    pub fn is_banned(&self, title: &str) -> bool {
        self.contains_banned_word(title) || self.contains_banned_phrase(title)
    }

    fn contains_banned_word(&self, title: &str) -> bool {
        normalize::clean(title).split_whitespace().any(|word| {
            let word: String = word
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            self.words.contains(&word)
        })
    }

    fn contains_banned_phrase(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.phrases.iter().any(|p| title.contains(p.as_str()))
    }
}
