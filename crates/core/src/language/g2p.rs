//! Pronunciation lookup against the CMU Pronouncing Dictionary.
//!
//! The dictionary is loaded from disk with [`PronouncingDictionary::from_file`].
//! Scanning real titles needs the full release (`cmudict-0.7b`); anything
//! much smaller leaves most titles unresolved.

use std::collections::HashMap;
use std::path::Path;
#[cfg(test)]
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

/// Entry count below which a dictionary can't be the full CMU release
/// (0.7b has about 125k distinct words).
pub const FULL_DICTIONARY_MIN_ENTRIES: usize = 100_000;

/// Word → ARPABET transcriptions, keyed case-insensitively.
///
/// Each transcription is a space-separated phone string such as
/// `"N AH0 V AA1 R"`. Variants keep their dictionary order.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl PronouncingDictionary {
    /// Parse dictionary text in CMU format.
    pub fn parse(data: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let Some((word_raw, phones_raw)) = line.split_once(char::is_whitespace) else {
                continue;
            };

            // Strip variant marker: WORD(2) -> WORD
            let word = word_raw
                .split('(')
                .next()
                .unwrap_or(word_raw)
                .to_uppercase();

            let phones = phones_raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if !phones.is_empty() {
                entries.entry(word).or_default().push(phones);
            }
        }
        Self { entries }
    }

    /// Load a full dictionary file (e.g. `cmudict-0.7b`).
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read pronouncing dictionary: {}", path.display()))?;
        // cmudict-0.7b ships as Latin-1; the comment block is the only non-ASCII part.
        let data = String::from_utf8_lossy(&bytes);
        let dict = Self::parse(&data);
        log::info!("Loaded {} dictionary entries from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Shared test dictionary covering the words the unit tests scan.
    #[cfg(test)]
    pub(crate) fn sample() -> Arc<Self> {
        static SAMPLE: OnceLock<Arc<PronouncingDictionary>> = OnceLock::new();
        SAMPLE
            .get_or_init(|| Arc::new(Self::parse(include_str!("testdata/cmudict_sample.txt"))))
            .clone()
    }

    /// All transcriptions for a word, in dictionary order.
    pub fn phones_for_word(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(&word.to_uppercase())
            .map(|variants| variants.as_slice())
    }

    /// The first listed transcription for a word.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.phones_for_word(word)
            .and_then(|variants| variants.first())
            .map(|phones| phones.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the dictionary is large enough to be the full CMU release.
    pub fn is_full(&self) -> bool {
        self.len() >= FULL_DICTIONARY_MIN_ENTRIES
    }
}

/// Stress digits of a transcription, one per vowel: `"P EY1 D R OW0"` → `"10"`.
pub fn stresses(phones: &str) -> String {
    phones
        .chars()
        .filter(|c| matches!(c, '0' | '1' | '2'))
        .collect()
}

/// Suffix of a transcription starting at its last primary- or
/// secondary-stressed vowel: `"N AH0 V AA1 R"` → `"AA1 R"`.
///
/// Returns the whole transcription when nothing after the first phone
/// carries stress.
pub fn rhyming_part(phones: &str) -> String {
    let list: Vec<&str> = phones.split_whitespace().collect();
    for i in (1..list.len()).rev() {
        if list[i].ends_with('1') || list[i].ends_with('2') {
            return list[i..].join(" ");
        }
    }
    list.join(" ")
}
