//! Sequence momentum: how often consecutive colors cross cluster boundaries.

pub mod mapping;
pub mod momentum;

pub use mapping::ColorClusterMap;
pub use momentum::{momentum, parse_sequence, rank_sequences, ScoredSequence};
