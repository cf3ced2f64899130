//! Typed rows produced by catalog ingestion.

use serde::{Deserialize, Serialize};

/// One row of the color catalog.
///
/// Channels are `None` when the source cell was empty or could not be parsed
/// as a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRecord {
    pub name: String,
    pub r: Option<f64>,
    pub g: Option<f64>,
    pub b: Option<f64>,
    pub word_tags: String,
}

impl ColorRecord {
    pub fn new(
        name: impl Into<String>,
        r: Option<f64>,
        g: Option<f64>,
        b: Option<f64>,
        word_tags: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            r,
            g,
            b,
            word_tags: word_tags.into(),
        }
    }

    /// Record with all three channels defined and no word associations.
    pub fn rgb(name: impl Into<String>, r: f64, g: f64, b: f64) -> Self {
        Self::new(name, Some(r), Some(g), Some(b), "")
    }

    /// Case-insensitive identity key.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Channel triple, only when every channel is defined.
    pub fn channels(&self) -> Option<[f64; 3]> {
        Some([self.r?, self.g?, self.b?])
    }

    /// Channel triple with missing values substituted by zero.
    pub fn channels_or_zero(&self) -> [f64; 3] {
        [
            self.r.unwrap_or(0.0),
            self.g.unwrap_or(0.0),
            self.b.unwrap_or(0.0),
        ]
    }

    pub fn channel(&self, index: usize) -> Option<f64> {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => None,
        }
    }
}

/// One row of the sequence catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Raw delimited color list; `None` when the cell was empty.
    pub sequence: Option<String>,
}

impl SequenceRecord {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: Some(sequence.into()),
        }
    }

    pub fn missing() -> Self {
        Self { sequence: None }
    }
}

/// One row of the semantic-mapping catalog.
///
/// Only the upper-case `R`, `G`, `B` channels are typed; every other column
/// is kept verbatim in `fields` in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMapping {
    pub fields: Vec<(String, String)>,
    pub r: Option<f64>,
    pub g: Option<f64>,
    pub b: Option<f64>,
}

impl SemanticMapping {
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Substitution applied to a malformed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Substitution {
    /// Cell treated as missing; downstream numeric stages read it as zero.
    Missing,
}

/// Auditable record of a cell that could not be read as its column's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoercionIssue {
    pub catalog: String,
    pub row: usize,
    pub column: String,
    pub raw: String,
    pub substitution: Substitution,
}

/// Trim and lower-case a color name so it can be used as a lookup key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
