//! The post text for a matched pair.

const WIKI_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Lay a pair of titles out to the tune of "Camptown Races".
///
/// Returns `None` if the verse is longer than `max_len` characters.
pub fn compose_verse(first: &str, second: &str, max_len: usize) -> Option<String> {
    let verse = [first, "Doo dah, doo dah", second, "Oh, doo dah day"].join("\n");
    if verse.chars().count() <= max_len {
        Some(verse)
    } else {
        log::warn!("Verse too long ({} chars): {}", verse.chars().count(), verse);
        None
    }
}

/// Article link for a title: spaces become underscores, everything else
/// outside `A-Za-z0-9-_.~` is percent-encoded.
pub fn wiki_url(title: &str) -> String {
    format!("{}{}", WIKI_BASE, urlencoding::encode(&title.replace(' ', "_")))
}
