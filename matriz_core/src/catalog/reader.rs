//! Delimited-text reading shared by every catalog.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::record::{CoercionIssue, Substitution};
use crate::error::{MatrizError, MatrizResult};

/// Header row plus data rows of a CSV document.
pub(crate) struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn read<R: Read>(input: R, catalog: &str) -> MatrizResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|err| MatrizError::malformed_table(catalog, err.to_string()))?
            .clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(MatrizError::malformed_table(catalog, "missing header row"));
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| MatrizError::malformed_table(catalog, err.to_string()))?;

        Ok(Self { headers, rows })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require(&self, name: &str, catalog: &str) -> MatrizResult<usize> {
        self.column(name)
            .ok_or_else(|| MatrizError::missing_column(catalog, name))
    }
}

/// Cell text; short rows read as empty.
pub(crate) fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

/// Parse a numeric cell, recording an issue when non-empty text is not a finite number.
pub(crate) fn coerce_number(
    raw: &str,
    catalog: &str,
    row: usize,
    column: &str,
    issues: &mut Vec<CoercionIssue>,
) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            issues.push(CoercionIssue {
                catalog: catalog.to_string(),
                row,
                column: column.to_string(),
                raw: raw.to_string(),
                substitution: Substitution::Missing,
            });
            None
        }
    }
}
