//! Run configuration: meter, override tables, banned content and search
//! pacing.
//!
//! Everything has a built-in default. A JSON file can replace any subset
//! of fields; missing fields keep their defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::meter::Meter;

/// The Camptown meter: stressed and unstressed syllables alternating,
/// seven in all ("Camp-town la-dies sing this song").
pub const CAMPTOWN_METER: &str = "x0x0x0x";

/// Words that disqualify a title outright, matched against lowercased
/// alphanumeric-only tokens.
pub const BANNED_WORDS: &[&str] = &[
    "bombing", "genocide", "holocaust", "killing", "killings", "lynching", "massacre",
    "murder", "murders", "nazi", "nazis", "pogrom", "rape", "shooting", "slavery",
    "suicide", "terrorism", "terrorist",
];

/// Phrases that disqualify a title when they occur anywhere in it.
pub const BANNED_PHRASES: &[&str] = &[
    "concentration camp",
    "death camp",
    "mass grave",
    "school shooting",
    "sexual abuse",
];

/// Stress digits for words the dictionary gets wrong or lacks.
pub const STRESS_OVERRIDES: &[(&str, &str)] = &[("our", "1")];

/// Transcriptions for words missing from the dictionary.
pub const PHONE_OVERRIDES: &[(&str, &str)] = &[
    ("abreu", "AH0 B R EY1 UW0"),
    ("vs", "V ER1 S AH0 S"),
];

/// Configuration values that parse but can't be used.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("meter pattern is empty")]
    EmptyMeter,
    #[error("invalid meter pattern {pattern:?}: unexpected {found:?} (use 0, 1, 2, x or *)")]
    InvalidMeter { pattern: String, found: char },
    #[error("{field} = {value} is not a usable pause in seconds")]
    InvalidBackoff { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Target meter pattern, see [`crate::meter::classify::Meter::parse`].
    pub meter: String,
    pub banned_words: Vec<String>,
    pub banned_phrases: Vec<String>,
    pub stress_overrides: HashMap<String, String>,
    pub phone_overrides: HashMap<String, String>,
    /// Full CMU pronouncing dictionary file.
    pub cmudict: Option<PathBuf>,
    /// Batches to fetch before giving up.
    pub max_attempts: u32,
    /// Pause between batches (seconds).
    pub backoff_secs: f64,
    /// Pause after a source timeout (seconds).
    pub timeout_backoff_secs: f64,
    /// Titles per batch.
    pub batch_size: usize,
    /// Longest verse the publisher accepts (characters).
    pub max_post_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self {
            meter: CAMPTOWN_METER.to_string(),
            banned_words: BANNED_WORDS.iter().map(|s| s.to_string()).collect(),
            banned_phrases: BANNED_PHRASES.iter().map(|s| s.to_string()).collect(),
            stress_overrides: owned(STRESS_OVERRIDES),
            phone_overrides: owned(PHONE_OVERRIDES),
            cmudict: None,
            max_attempts: 10,
            backoff_secs: 5.0,
            timeout_backoff_secs: 60.0,
            batch_size: 10,
            max_post_len: 300,
        }
    }
}

impl Config {
    /// Load and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Invalid config JSON: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Check the values serde can't: the meter pattern and the pauses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Meter::parse(&self.meter)?;
        self.backoff()?;
        self.timeout_backoff()?;
        Ok(())
    }

    pub fn backoff(&self) -> Result<Duration, ConfigError> {
        pause("backoff_secs", self.backoff_secs)
    }

    pub fn timeout_backoff(&self) -> Result<Duration, ConfigError> {
        pause("timeout_backoff_secs", self.timeout_backoff_secs)
    }
}

/// Negative pauses mean no pause; infinite or overlong ones are errors.
fn pause(field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    if secs.is_nan() {
        return Err(ConfigError::InvalidBackoff { field, value: secs });
    }
    Duration::try_from_secs_f64(secs.max(0.0))
        .map_err(|_| ConfigError::InvalidBackoff { field, value: secs })
}

/// Config file path from `CAMPTOWN_CONFIG`, if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("CAMPTOWN_CONFIG").map(PathBuf::from)
}

/// Full pronouncing dictionary path from `CAMPTOWN_CMUDICT`, if set.
pub fn dictionary_path() -> Option<PathBuf> {
    std::env::var_os("CAMPTOWN_CMUDICT").map(PathBuf::from)
}

/// Local match store path from `LOCAL_DATASTORE`, if set.
pub fn datastore_path() -> Option<PathBuf> {
    std::env::var_os("LOCAL_DATASTORE").map(PathBuf::from)
}
