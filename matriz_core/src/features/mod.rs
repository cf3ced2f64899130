//! Feature space construction: vocabulary selection, fusion and scaling.

pub mod matrix;
pub mod scaling;
pub mod vocabulary;

pub use matrix::{FeatureMatrix, CHANNEL_COLUMNS};
pub use scaling::{standardize, Standardizer};
pub use vocabulary::{tokenize, Vocabulary, VocabularyTerm};
