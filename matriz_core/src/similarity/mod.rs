//! Similarity engine: pairwise channel dot products normalized against the
//! catalog-wide maximum.

pub mod state;
pub mod table;

pub use state::SimilarityState;
pub use table::{dot, SimilarityOutcome, SimilarityScore, SimilarityTable};
