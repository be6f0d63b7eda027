//! Text normalization, numeral expansion and pronunciation lookup.

pub mod g2p;
pub mod normalize;
pub mod numbers;
pub mod pronounce;
