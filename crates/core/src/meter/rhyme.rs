//! Rhyme keys from a word's final stressed vowel onward.

use crate::language::g2p;
use crate::language::pronounce::PronunciationResolver;
use crate::types::RhymeKey;

/// Rhyme key for a single word, or `None` if it has no transcription.
///
/// Stress overrides don't carry phones, so a word can scan without
/// having a key.
pub fn rhyme_key(resolver: &PronunciationResolver, word: &str) -> Option<RhymeKey> {
    let phones = resolver.phones(word)?;
    let key = RhymeKey::new(g2p::rhyming_part(&phones));
    log::debug!("Rhyme for {}: {} -> {}", word, phones, key);
    Some(key)
}
