//! Repeated batch search for two rhyming titles in meter.
//!
//! Each batch is scanned title by title. Metered titles are offered to the
//! match store under their rhyme key; the first offer that completes a pair
//! ends the search. Candidates stored along the way stay in the store for
//! later runs.

pub mod source;
#[cfg(feature = "wikipedia")]
pub mod wikipedia;

use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::meter::MeterClassifier;
use crate::store::{MatchStore, Offer};
use crate::types::RhymePair;

pub use source::{SourceError, TitleSource, VecSource};

/// Pacing for [`RhymeSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    /// Batches to fetch before giving up. Timeouts count as attempts.
    pub max_attempts: u32,
    /// Pause after a batch that produced no pair.
    pub backoff: Duration,
    /// Pause after the source times out.
    pub timeout_backoff: Duration,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            max_attempts: config.max_attempts,
            backoff: config.backoff()?,
            timeout_backoff: config.timeout_backoff()?,
        })
    }
}

/// How a search ended, short of a fatal source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matched(RhymePair),
    Exhausted,
}

pub struct RhymeSearch<'a> {
    classifier: &'a MeterClassifier,
    settings: SearchSettings,
}

impl<'a> RhymeSearch<'a> {
    pub fn new(classifier: &'a MeterClassifier, settings: SearchSettings) -> Self {
        Self {
            classifier,
            settings,
        }
    }

    /// Fetch and scan batches until a pair turns up or attempts run out.
    ///
    /// `store` is updated in place and keeps every insert even when the
    /// search fails, so callers should persist it regardless of outcome.
    pub fn run(
        &self,
        store: &mut MatchStore,
        source: &mut dyn TitleSource,
    ) -> Result<SearchOutcome, SourceError> {
        for attempt in 1..=self.settings.max_attempts {
            let last = attempt == self.settings.max_attempts;
            log::debug!(
                "Attempt {}/{} from {}",
                attempt,
                self.settings.max_attempts,
                source.name()
            );

            let titles = match source.fetch_batch() {
                Ok(titles) => titles,
                Err(err) if err.is_retryable() => {
                    log::warn!("{}", err);
                    if !last {
                        std::thread::sleep(self.settings.timeout_backoff);
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(pair) = self.scan_batch(store, &titles) {
                return Ok(SearchOutcome::Matched(pair));
            }

            if !last {
                std::thread::sleep(self.settings.backoff);
            }
        }

        log::info!("No matches found.");
        Ok(SearchOutcome::Exhausted)
    }

    /// Offer every metered title in a batch to the store, stopping at the
    /// first completed pair.
    pub fn scan_batch(&self, store: &mut MatchStore, titles: &[String]) -> Option<RhymePair> {
        for title in titles {
            let Some(key) = self.classifier.rhyme_key_for(title) else {
                continue;
            };
            match store.offer(key.clone(), title) {
                Offer::Stored => log::info!("Adding {}, which rhymes with {}", title, key),
                Offer::SameFinalWord { existing } => log::warn!(
                    "{} and {} are not a good rhyme, throwing {} away for now",
                    existing,
                    title,
                    title
                ),
                Offer::Matched(pair) => {
                    log::info!("Matched: {} and {}", pair.first, pair.second);
                    return Some(pair);
                }
            }
        }
        None
    }
}
