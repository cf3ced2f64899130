//! Shared application state handed to every handler.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use matriz_core::{
    AnalysisConfig, ColorCatalog, ColorSchema, Journal, SequenceAnalyzer, SimilarityState,
};
use serde::Serialize;

use crate::config::ServerConfig;

/// Per-endpoint call counters.
#[derive(Debug, Default)]
pub struct UsageStats {
    analyze_sequences_calls: AtomicU64,
    color_similarity_calls: AtomicU64,
}

/// Point-in-time copy of [`UsageStats`], serialized by `/usage-stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub analyze_sequences_calls: u64,
    pub color_similarity_calls: u64,
}

impl UsageStats {
    /// Count one completed analysis; returns the new total.
    pub fn record_analysis(&self) -> u64 {
        self.analyze_sequences_calls.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count one answered similarity lookup; returns the new total.
    pub fn record_similarity(&self) -> u64 {
        self.color_similarity_calls.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            analyze_sequences_calls: self.analyze_sequences_calls.load(Ordering::Relaxed),
            color_similarity_calls: self.color_similarity_calls.load(Ordering::Relaxed),
        }
    }
}

/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppState {
    pub similarity: Arc<SimilarityState>,
    pub usage: Arc<UsageStats>,
    pub analyzer: Arc<SequenceAnalyzer>,
    pub journal: Option<Journal>,
}

impl AppState {
    /// State with an empty similarity table and no journal.
    pub fn new(analysis: AnalysisConfig) -> Self {
        Self {
            similarity: Arc::new(SimilarityState::new()),
            usage: Arc::new(UsageStats::default()),
            analyzer: Arc::new(SequenceAnalyzer::new(analysis)),
            journal: None,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let state = Self::new(config.analysis.clone());
        if config.journal_enabled {
            state.with_journal(Journal::new(config.journal_dir.clone()))
        } else {
            state
        }
    }

    pub fn with_similarity(mut self, similarity: SimilarityState) -> Self {
        self.similarity = Arc::new(similarity);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Build the similarity table from the catalog at `path`.
    ///
    /// A catalog that cannot be read leaves the table uninitialized; the
    /// server keeps running and similarity requests answer with an error.
    pub fn load_catalog<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match ColorCatalog::from_path(path, &ColorSchema::channels_only()) {
            Ok(catalog) => {
                if !catalog.issues().is_empty() {
                    tracing::warn!(
                        "{} cells in {} could not be read as numbers",
                        catalog.issues().len(),
                        path.display()
                    );
                }
                let table = self.similarity.initialize(&catalog);
                if let Some(journal) = &self.journal {
                    if let Err(err) = journal.log_similarity(table) {
                        tracing::warn!("Failed to journal similarity table: {}", err);
                    }
                }
                tracing::info!(
                    "Startup: Color data loaded and dot products computed ({} pairs, max {}).",
                    table.len(),
                    table.max_dot_product()
                );
                true
            }
            Err(err) => {
                tracing::error!("Error loading startup data from {}: {}", path.display(), err);
                false
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("similarity_ready", &self.similarity.is_initialized())
            .field("usage", &self.usage.snapshot())
            .field("journal", &self.journal)
            .finish()
    }
}
