//! Process-wide holder for the similarity table.
//!
//! The table is built once during startup and read concurrently afterwards.
//! The holder is an ordinary value so each test can own a fresh instance.

use std::sync::OnceLock;

use super::table::{SimilarityScore, SimilarityTable};
use crate::catalog::ColorCatalog;
use crate::error::{MatrizError, MatrizResult};

const COMPONENT: &str = "Similarity table";

#[derive(Debug, Default)]
pub struct SimilarityState {
    table: OnceLock<SimilarityTable>,
}

impl SimilarityState {
    /// Uninitialized state; lookups fail until [`initialize`](Self::initialize) runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// State that is ready to serve lookups.
    pub fn with_table(table: SimilarityTable) -> Self {
        Self {
            table: OnceLock::from(table),
        }
    }

    /// Build the table from `catalog` unless it already exists.
    pub fn initialize(&self, catalog: &ColorCatalog) -> &SimilarityTable {
        self.table
            .get_or_init(|| SimilarityTable::precompute(catalog))
    }

    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn table(&self) -> MatrizResult<&SimilarityTable> {
        self.table
            .get()
            .ok_or_else(|| MatrizError::uninitialized(COMPONENT))
    }

    pub fn lookup(&self, first: &str, second: &str) -> MatrizResult<SimilarityScore> {
        self.table()?.lookup(first, second)
    }
}
