//! Title cleanup and tokenization ahead of pronunciation lookup.

/// Characters dropped outright before tokenizing.
const DELETED_CHARS: &[char] = &['(', ')', '[', ']', '{', '}', ',', ':', ';', '.'];

/// Remove characters the pronouncing dictionary can't handle.
///
/// Brackets and separators are deleted, hyphens become spaces and `&`
/// becomes the word "and".
pub fn clean(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            c if DELETED_CHARS.contains(&c) => {}
            '-' => out.push(' '),
            '&' => out.push_str(" and "),
            c => out.push(c),
        }
    }
    out
}

/// Split text into words, dropping ASCII punctuation except apostrophes.
///
/// The dictionary indexes contractions ("it's", "lady's"), so apostrophes
/// have to survive.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| *c == '\'' || !c.is_ascii_punctuation())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Clean and split a raw title into word tokens.
pub fn tokenize(title: &str) -> Vec<String> {
    split_words(&clean(title))
}

/// Last word of a title, lowercased, or `None` for an empty title.
pub fn final_word(title: &str) -> Option<String> {
    tokenize(title).pop().map(|w| w.to_lowercase())
}
