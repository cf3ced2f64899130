//! Catalog ingestion: delimited text in, typed rows plus coercion issues out.

mod reader;
pub mod record;
pub mod table;

pub use record::{
    normalize_name, CoercionIssue, ColorRecord, SemanticMapping, SequenceRecord, Substitution,
};
pub use table::{ColorCatalog, ColorSchema, SemanticCatalog, SequenceCatalog};
