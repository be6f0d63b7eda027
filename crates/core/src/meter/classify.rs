//! Scan a title into stress digits and test it against the target meter.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::language::g2p::PronouncingDictionary;
use crate::language::normalize;
use crate::language::numbers::{self, Expansion};
use crate::language::pronounce::PronunciationResolver;
use crate::meter::banned::BannedFilter;
use crate::meter::rhyme;
use crate::types::{RhymeKey, Stress};

/// Scanning stops once this many stress digits have piled up with words
/// still left to read.
pub const MAX_STRESS_LEN: usize = 8;

/// What one syllable position of a meter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllableClass {
    /// Exactly this stress digit.
    Exact(char),
    /// Primary or secondary stress.
    Stressed,
    Any,
}

impl SyllableClass {
    fn accepts(self, digit: char) -> bool {
        match self {
            SyllableClass::Exact(d) => d == digit,
            SyllableClass::Stressed => digit == '1' || digit == '2',
            SyllableClass::Any => true,
        }
    }
}

/// A fixed-length stress template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meter {
    positions: Vec<SyllableClass>,
}

impl Meter {
    /// Parse a pattern with one character per syllable: `0`, `1` or `2`
    /// for that exact stress, `x` for any stressed syllable, `*` for
    /// anything.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyMeter);
        }
        let positions = pattern
            .chars()
            .map(|c| match c {
                '0' | '1' | '2' => Ok(SyllableClass::Exact(c)),
                'x' | 'X' => Ok(SyllableClass::Stressed),
                '*' => Ok(SyllableClass::Any),
                other => Err(ConfigError::InvalidMeter {
                    pattern: pattern.to_string(),
                    found: other,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { positions })
    }

    /// The Camptown meter, `x0x0x0x`.
    pub fn camptown() -> Self {
        let positions = (0..7)
            .map(|i| {
                if i % 2 == 0 {
                    SyllableClass::Stressed
                } else {
                    SyllableClass::Exact('0')
                }
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True if the stress string has exactly the meter's length and every
    /// digit fits its position.
    pub fn matches(&self, stresses: &str) -> bool {
        stresses.chars().count() == self.positions.len()
            && stresses
                .chars()
                .zip(&self.positions)
                .all(|(digit, class)| class.accepts(digit))
    }
}

/// Outcome of scanning a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// Rejected by the banned word/phrase filter.
    Banned,
    /// A word or numeral with no known pronunciation.
    Unresolved { word: String },
    /// Gave up early, the title is already too long.
    TooLong { stresses: String },
    /// Fully scanned, but the stresses don't fit the meter.
    Mismatch { stresses: String },
    /// Fits the meter. `final_word` is the last word that was looked up.
    Match { stresses: String, final_word: String },
}

impl Scan {
    pub fn is_match(&self) -> bool {
        matches!(self, Scan::Match { .. })
    }

    /// Stress digits gathered before the scan ended, if it got that far.
    pub fn stresses(&self) -> Option<&str> {
        match self {
            Scan::TooLong { stresses }
            | Scan::Mismatch { stresses }
            | Scan::Match { stresses, .. } => Some(stresses.as_str()),
            Scan::Banned | Scan::Unresolved { .. } => None,
        }
    }
}

/// Decides whether titles fit the meter and what they rhyme on.
#[derive(Debug, Clone)]
pub struct MeterClassifier {
    meter: Meter,
    banned: BannedFilter,
    resolver: PronunciationResolver,
}

impl MeterClassifier {
    pub fn new(meter: Meter, banned: BannedFilter, resolver: PronunciationResolver) -> Self {
        Self {
            meter,
            banned,
            resolver,
        }
    }

    pub fn from_config(
        config: &Config,
        dictionary: Arc<PronouncingDictionary>,
    ) -> Result<Self, ConfigError> {
        let meter = Meter::parse(&config.meter)?;
        let banned = BannedFilter::new(&config.banned_words, &config.banned_phrases);
        let resolver = PronunciationResolver::new(
            dictionary,
            &config.stress_overrides,
            &config.phone_overrides,
        );
        Ok(Self::new(meter, banned, resolver))
    }

    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    pub fn resolver(&self) -> &PronunciationResolver {
        &self.resolver
    }

    /// Scan a title word by word.
    ///
    /// Numerals are spelled out and their words queued ahead of the rest
    /// of the title. Any unknown word ends the scan.
    pub fn scan(&self, title: &str) -> Scan {
        if self.banned.is_banned(title) {
            log::debug!("Banned: {}", title);
            return Scan::Banned;
        }

        let mut queue: VecDeque<String> = normalize::tokenize(title).into();
        let mut stresses = String::new();
        let mut final_word = None;

        while let Some(token) = queue.pop_front() {
            if stresses.len() > MAX_STRESS_LEN {
                return Scan::TooLong { stresses };
            }
            match numbers::expand(&token) {
                Expansion::Words(words) => {
                    for word in words.into_iter().rev() {
                        queue.push_front(word);
                    }
                }
                Expansion::Unresolvable => return Scan::Unresolved { word: token },
                Expansion::Word(word) => match self.resolver.stress(&word) {
                    Stress::Resolved(digits) => {
                        stresses.push_str(&digits);
                        final_word = Some(word);
                    }
                    Stress::Unresolvable => return Scan::Unresolved { word },
                },
            }
        }

        log::debug!("Stresses for {}: {}", title, stresses);
        match final_word {
            Some(final_word) if self.meter.matches(&stresses) => Scan::Match {
                stresses,
                final_word,
            },
            _ => Scan::Mismatch { stresses },
        }
    }

    pub fn is_meter_match(&self, title: &str) -> bool {
        self.scan(title).is_match()
    }

    /// Rhyme key of a title's final word, or `None` if the title doesn't
    /// fit the meter or the word has no transcription.
    pub fn rhyme_key_for(&self, title: &str) -> Option<RhymeKey> {
        match self.scan(title) {
            Scan::Match { final_word, .. } => rhyme::rhyme_key(&self.resolver, &final_word),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MeterClassifier {
        MeterClassifier::from_config(&Config::default(), PronouncingDictionary::sample()).unwrap()
    }

    #[test]
    fn test_parse_camptown() {
        assert_eq!(Meter::parse("x0x0x0x").unwrap(), Meter::camptown());
        assert_eq!(Meter::camptown().len(), 7);
    }

    #[test]
    fn test_parse_rejects_bad_pattern() {
        assert!(matches!(Meter::parse(""), Err(ConfigError::EmptyMeter)));
        assert!(matches!(
            Meter::parse("x0y"),
            Err(ConfigError::InvalidMeter { found: 'y', .. })
        ));
    }

    #[test]
    fn test_meter_matches() {
        let m = Meter::camptown();
        assert!(m.matches("1010101"));
        assert!(m.matches("2010201"));
        assert!(!m.matches("1011101"));
        assert!(!m.matches("101010"));
        assert!(!m.matches("10101010"));
        assert!(!m.matches(""));
    }

    #[test]
    fn test_meter_exact_and_wildcard() {
        let m = Meter::parse("1*2").unwrap();
        assert!(m.matches("102"));
        assert!(m.matches("112"));
        assert!(!m.matches("101"));
        assert!(!m.matches("202"));
    }

    #[test]
    fn test_known_titles() {
        let c = classifier();
        assert!(c.is_meter_match("Pedro, Marshal of Navarre"));
        assert!(c.is_meter_match("Savage 2: A Tortured Soul"));
        assert!(c.is_meter_match("It's The Bob Abreu Show"));
        assert!(!c.is_meter_match("Single Payer Health Insurance"));
        assert!(!c.is_meter_match("Our Lady's Grammar School"));
        assert!(!c.is_meter_match("City & Guilds Mnemonic Code"));
        assert!(!c.is_meter_match("Pedro Gomes de Abreu"));
        assert!(!c.is_meter_match("Romeo, Romeo, wherefore art thou, Romeo?"));
    }

    #[test]
    fn test_scan_stresses() {
        let c = classifier();
        assert_eq!(
            c.scan("Teenage Mutant Ninja Turtles"),
            Scan::Mismatch {
                stresses: "12101010".into()
            }
        );
        assert_eq!(
            c.scan("Pedro, Marshal of Navarre"),
            Scan::Match {
                stresses: "1010101".into(),
                final_word: "Navarre".into()
            }
        );
    }

    #[test]
    fn test_every_match_fits_meter() {
        let c = classifier();
        for title in [
            "Pedro, Marshal of Navarre",
            "Savage 2: A Tortured Soul",
            "It's The Bob Abreu Show",
        ] {
            let scan = c.scan(title);
            let stresses = scan.stresses().unwrap();
            assert_eq!(stresses.len(), 7, "{}", title);
            assert!(c.meter().matches(stresses));
        }
    }

    #[test]
    fn test_long_title_stops_early() {
        let c = classifier();
        // Romeo x2 + wherefore + art is nine digits with words left over.
        assert_eq!(
            c.scan("Romeo, Romeo, wherefore art thou, Romeo?"),
            Scan::TooLong {
                stresses: "100100121".into()
            }
        );
    }

    #[test]
    fn test_eight_digits_keep_scanning() {
        let c = classifier();
        // Eight digits with "Show" still queued: read it, then mismatch.
        assert_eq!(
            c.scan("Pedro Marshal Savage Navarre Show"),
            Scan::Mismatch {
                stresses: "101010011".into()
            }
        );
        // Nine digits with a word left: stop before reading it.
        assert_eq!(
            c.scan("Pedro Marshal Savage Navarre Show Show"),
            Scan::TooLong {
                stresses: "101010011".into()
            }
        );
    }

    #[test]
    fn test_long_title_stops_inside_numeral() {
        let c = classifier();
        // nineteen eighty four: the limit trips before "four" is read.
        assert_eq!(
            c.scan("Pedro Marshal Savage 1984"),
            Scan::TooLong {
                stresses: "1010101110".into()
            }
        );
    }

    #[test]
    fn test_unknown_word_poisons_title() {
        let c = classifier();
        assert_eq!(
            c.scan("Pedro, Marshal of Xyzzyplugh"),
            Scan::Unresolved {
                word: "Xyzzyplugh".into()
            }
        );
    }

    #[test]
    fn test_unreadable_numeral_poisons_title() {
        let c = classifier();
        let scan = c.scan("Pedro 123456789012345678901234567890");
        assert_eq!(
            scan,
            Scan::Unresolved {
                word: "123456789012345678901234567890".into()
            }
        );
        assert!(!scan.is_match());
    }

    #[test]
    fn test_numeral_words_are_requeued() {
        let c = classifier();
        // nineteen eighty four = 11 10 1
        assert_eq!(
            c.scan("1984"),
            Scan::Mismatch {
                stresses: "11101".into()
            }
        );
        // twenty first = 10 1
        assert_eq!(
            c.scan("21st"),
            Scan::Mismatch {
                stresses: "101".into()
            }
        );
    }

    #[test]
    fn test_numeral_final_word_is_spelled_out() {
        let c = classifier();
        // Savage (10) Marshal (10) 21 (twenty one = 10 1)
        match c.scan("Savage Marshal 21") {
            Scan::Match { final_word, .. } => assert_eq!(final_word, "one"),
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_banned_title_never_matches() {
        let config = Config {
            banned_words: vec!["navarre".into()],
            ..Config::default()
        };
        let c = MeterClassifier::from_config(&config, PronouncingDictionary::sample()).unwrap();
        assert_eq!(c.scan("Pedro, Marshal of Navarre"), Scan::Banned);
        assert_eq!(c.rhyme_key_for("Pedro, Marshal of Navarre"), None);

        let config = Config {
            banned_phrases: vec!["Marshal of".into()],
            ..Config::default()
        };
        let c = MeterClassifier::from_config(&config, PronouncingDictionary::sample()).unwrap();
        assert!(!c.is_meter_match("Pedro, Marshal of Navarre"));
    }

    #[test]
    fn test_empty_title() {
        let c = classifier();
        assert_eq!(c.scan(""), Scan::Mismatch { stresses: String::new() });
    }

    #[test]
    fn test_rhyme_key_for() {
        let c = classifier();
        assert_eq!(
            c.rhyme_key_for("Pedro, Marshal of Navarre"),
            Some(RhymeKey::new("AA1 R"))
        );
        assert_eq!(
            c.rhyme_key_for("Savage 2: A Tortured Soul"),
            Some(RhymeKey::new("OW1 L"))
        );
        assert_eq!(c.rhyme_key_for("Single Payer Health Insurance"), None);
    }

    #[test]
    fn test_rhyme_key_none_without_transcription() {
        // Stress known only through an override: fits the meter, no phones.
        let mut config = Config::default();
        config.stress_overrides.insert("zorblax".into(), "01".into());
        let c = MeterClassifier::from_config(&config, PronouncingDictionary::sample()).unwrap();
        assert!(c.is_meter_match("Pedro, Marshal of Zorblax"));
        assert_eq!(c.rhyme_key_for("Pedro, Marshal of Zorblax"), None);
    }
}
