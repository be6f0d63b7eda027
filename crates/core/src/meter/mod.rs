//! Meter detection and rhyme keys.

pub mod banned;
pub mod classify;
pub mod rhyme;

pub use classify::{Meter, MeterClassifier, Scan};
