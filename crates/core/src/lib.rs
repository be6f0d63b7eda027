//! Find Wikipedia-style titles that scan like "Camptown Races" and pair
//! up two that rhyme.

pub mod config;
pub mod language;
pub mod meter;
pub mod search;
pub mod store;
pub mod types;
pub mod verse;

pub use config::{Config, ConfigError};
pub use meter::{Meter, MeterClassifier, Scan};
pub use search::{RhymeSearch, SearchOutcome, SearchSettings};
pub use store::MatchStore;
pub use types::{RhymeKey, RhymePair, Stress};
