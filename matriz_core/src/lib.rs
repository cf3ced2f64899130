//! # La Matriz Core
//!
//! Two independent, deterministic pipelines over color catalogs:
//!
//! - a similarity engine that precomputes channel dot products between every
//!   pair of named colors and scores lookups against the global maximum, and
//! - a sequence clustering pipeline that fuses channel intensities with word
//!   associations, clusters the colors with seeded k-means and ranks color
//!   sequences by how often they jump between clusters.
//!
//! ## Quick Start
//!
//! ```rust
//! use matriz_core::{analyze, ColorCatalog, ColorRecord, SequenceCatalog, SequenceRecord, SimilarityTable};
//!
//! let colors = ColorCatalog::from_records(vec![
//!     ColorRecord::new("red", Some(255.0), Some(0.0), Some(0.0), "passion fire"),
//!     ColorRecord::new("blue", Some(0.0), Some(0.0), Some(255.0), "calm sea"),
//! ]);
//!
//! let table = SimilarityTable::precompute(&colors);
//! let score = table.lookup("Red", " BLUE ").unwrap();
//! assert_eq!(score.dot_product, 0.0);
//!
//! let sequences = SequenceCatalog::from_records(vec![SequenceRecord::new("red,red,blue")]);
//! let analysis = analyze(&colors, &sequences, None, 2).unwrap();
//! assert_eq!(analysis.top_sequences[0].momentum, 0.5);
//! ```
//!
//! ## Core Modules
//!
//! - [`catalog`] - Delimited-text ingestion into typed rows
//! - [`similarity`] - Pairwise dot-product table and its process-wide holder
//! - [`features`] - Vocabulary selection, feature fusion and standardization
//! - [`cluster`] - k-means, 2-D projection and cluster summaries
//! - [`sequence`] - Momentum scoring and ranking
//! - [`config`] - Analysis configuration via TOML
//! - [`logging`] - JSON line-delimited run journal

pub mod analysis;
pub mod catalog;
pub mod cluster;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod sequence;
pub mod similarity;

pub use analysis::{analyze, AnalysisReport, SequenceAnalysis, SequenceAnalyzer};
pub use catalog::{
    CoercionIssue, ColorCatalog, ColorRecord, ColorSchema, SemanticCatalog, SemanticMapping,
    SequenceCatalog, SequenceRecord,
};
pub use cluster::{ClusterAssignment, ClusterSummary, Projection};
pub use config::{AnalysisConfig, ConfigError};
pub use error::{MatrizError, MatrizResult};
pub use features::{FeatureMatrix, Vocabulary};
pub use logging::Journal;
pub use sequence::{momentum, parse_sequence, ColorClusterMap, ScoredSequence};
pub use similarity::{SimilarityOutcome, SimilarityScore, SimilarityState, SimilarityTable};
