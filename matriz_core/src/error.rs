//! Error types for catalog ingestion, similarity lookups and sequence analysis.
//!
//! Malformed individual cells never surface here; they are recovered during
//! ingestion and reported as [`CoercionIssue`](crate::catalog::CoercionIssue)s.
//! Every variant below aborts the whole call it was raised from.

use std::fmt;

/// Result type alias for engine operations
pub type MatrizResult<T> = Result<T, MatrizError>;

/// Structural failures raised by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum MatrizError {
    /// A catalog is missing a column the computation needs
    MissingRequiredColumn { catalog: String, column: String },

    /// Requested cluster count is outside `[1, rows]`
    InvalidClusterCount { requested: i64, rows: usize },

    /// A catalog had no rows to work with
    EmptyCatalog { catalog: String },

    /// Neither ordering of the pair exists in the similarity table
    PairNotFound { first: String, second: String },

    /// Global maximum dot product is not a positive finite number, or the pair's
    /// own product overflowed, so no percentile can be derived
    PercentileUndefined { dot_product: f64 },

    /// Similarity table was queried before it was built
    UninitializedState { component: String },

    /// Delimited text could not be read as a table
    MalformedTable { catalog: String, details: String },

    /// Underlying I/O failure while reading a catalog
    Io { details: String },
}

impl fmt::Display for MatrizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrizError::MissingRequiredColumn { catalog, column } => {
                write!(
                    f,
                    "Missing required column '{}' in {} catalog",
                    column, catalog
                )
            }
            MatrizError::InvalidClusterCount { requested, rows } => {
                write!(
                    f,
                    "Invalid cluster count {}: must be between 1 and the number of color rows ({})",
                    requested, rows
                )
            }
            MatrizError::EmptyCatalog { catalog } => {
                write!(f, "Empty catalog: {} contains no rows", catalog)
            }
            MatrizError::PairNotFound { .. } => write!(f, "Color pair not found."),
            MatrizError::PercentileUndefined { dot_product } => {
                write!(
                    f,
                    "Similarity percentile undefined: maximum dot product is not positive and finite (pair dot product {})",
                    dot_product
                )
            }
            MatrizError::UninitializedState { component } => {
                write!(
                    f,
                    "{} has not been initialized. Build it before querying.",
                    component
                )
            }
            MatrizError::MalformedTable { catalog, details } => {
                write!(f, "Malformed {} catalog: {}", catalog, details)
            }
            MatrizError::Io { details } => write!(f, "I/O error: {}", details),
        }
    }
}

impl std::error::Error for MatrizError {}

impl From<std::io::Error> for MatrizError {
    fn from(err: std::io::Error) -> Self {
        MatrizError::Io {
            details: err.to_string(),
        }
    }
}

// Convenience constructors for common error patterns
impl MatrizError {
    pub fn missing_column(catalog: impl Into<String>, column: impl Into<String>) -> Self {
        MatrizError::MissingRequiredColumn {
            catalog: catalog.into(),
            column: column.into(),
        }
    }

    pub fn invalid_cluster_count(requested: i64, rows: usize) -> Self {
        MatrizError::InvalidClusterCount { requested, rows }
    }

    pub fn empty_catalog(catalog: impl Into<String>) -> Self {
        MatrizError::EmptyCatalog {
            catalog: catalog.into(),
        }
    }

    pub fn pair_not_found(first: impl Into<String>, second: impl Into<String>) -> Self {
        MatrizError::PairNotFound {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn uninitialized(component: impl Into<String>) -> Self {
        MatrizError::UninitializedState {
            component: component.into(),
        }
    }

    pub fn malformed_table(catalog: impl Into<String>, details: impl Into<String>) -> Self {
        MatrizError::MalformedTable {
            catalog: catalog.into(),
            details: details.into(),
        }
    }
}
