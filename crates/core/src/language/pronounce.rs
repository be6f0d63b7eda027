//! Word-level pronunciation with manual override layers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::language::g2p::{self, PronouncingDictionary};
use crate::types::Stress;

/// Resolves words to stress digits and transcriptions.
///
/// Lookup order for stresses: stress overrides, then phone overrides,
/// then the dictionary. Transcriptions skip the stress overrides.
/// All override keys match case-insensitively.
#[derive(Debug, Clone)]
pub struct PronunciationResolver {
    dictionary: Arc<PronouncingDictionary>,
    stress_overrides: HashMap<String, String>,
    phone_overrides: HashMap<String, String>,
}

impl PronunciationResolver {
    pub fn new(
        dictionary: Arc<PronouncingDictionary>,
        stress_overrides: &HashMap<String, String>,
        phone_overrides: &HashMap<String, String>,
    ) -> Self {
        let lower = |m: &HashMap<String, String>| {
            m.iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect::<HashMap<_, _>>()
        };
        Self {
            dictionary,
            stress_overrides: lower(stress_overrides),
            phone_overrides: lower(phone_overrides),
        }
    }

    /// Resolver with no overrides.
    pub fn plain(dictionary: Arc<PronouncingDictionary>) -> Self {
        Self::new(dictionary, &HashMap::new(), &HashMap::new())
    }

    /// Stress digits for a single word.
    pub fn stress(&self, word: &str) -> Stress {
        if let Some(digits) = self.stress_overrides.get(&word.to_lowercase()) {
            return Stress::Resolved(digits.clone());
        }
        match self.phones(word) {
            Some(phones) => Stress::Resolved(g2p::stresses(&phones)),
            None => Stress::Unresolvable,
        }
    }

    /// ARPABET transcription for a single word, if any.
    pub fn phones(&self, word: &str) -> Option<String> {
        if let Some(phones) = self.phone_overrides.get(&word.to_lowercase()) {
            return Some(phones.clone());
        }
        self.dictionary.lookup(word).map(str::to_string)
    }
}
