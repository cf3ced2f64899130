//! Typed catalogs built from delimited text or in-memory rows.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::reader::{cell, coerce_number, RawTable};
use super::record::{CoercionIssue, ColorRecord, SemanticMapping, SequenceRecord};
use crate::error::MatrizResult;

pub const COLOR_CATALOG: &str = "color";
pub const SEQUENCE_CATALOG: &str = "sequence";
pub const SEMANTIC_CATALOG: &str = "semantic mapping";

/// Column layout expected from a color catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSchema {
    pub name_column: String,
    pub channel_columns: [String; 3],
    /// Free-text word association column; `None` when only channels are needed.
    pub word_column: Option<String>,
}

impl ColorSchema {
    /// Schema for the clustering pipeline: name, channels and word associations.
    pub fn with_words(word_column: impl Into<String>) -> Self {
        Self {
            word_column: Some(word_column.into()),
            ..Self::channels_only()
        }
    }

    /// Schema for the similarity engine: name and channels.
    pub fn channels_only() -> Self {
        Self {
            name_column: "color".to_string(),
            channel_columns: ["r".to_string(), "g".to_string(), "b".to_string()],
            word_column: None,
        }
    }
}

impl Default for ColorSchema {
    fn default() -> Self {
        Self::with_words("english-words")
    }
}

/// Color catalog with the coercion issues met while reading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorCatalog {
    records: Vec<ColorRecord>,
    issues: Vec<CoercionIssue>,
}

impl ColorCatalog {
    pub fn from_records(records: Vec<ColorRecord>) -> Self {
        Self {
            records,
            issues: Vec::new(),
        }
    }

    pub fn from_reader<R: Read>(input: R, schema: &ColorSchema) -> MatrizResult<Self> {
        let table = RawTable::read(input, COLOR_CATALOG)?;

        let name_idx = table.require(&schema.name_column, COLOR_CATALOG)?;
        let mut channel_idx = [0usize; 3];
        for (slot, column) in channel_idx.iter_mut().zip(&schema.channel_columns) {
            *slot = table.require(column, COLOR_CATALOG)?;
        }
        let word_idx = schema
            .word_column
            .as_deref()
            .map(|column| table.require(column, COLOR_CATALOG))
            .transpose()?;

        let mut issues = Vec::new();
        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut channels = [None; 3];
                for (channel, (&idx, column)) in channels
                    .iter_mut()
                    .zip(channel_idx.iter().zip(&schema.channel_columns))
                {
                    *channel =
                        coerce_number(cell(row, idx), COLOR_CATALOG, row_idx, column, &mut issues);
                }
                ColorRecord {
                    name: cell(row, name_idx).to_string(),
                    r: channels[0],
                    g: channels[1],
                    b: channels[2],
                    word_tags: word_idx
                        .map(|idx| cell(row, idx).to_string())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(Self { records, issues })
    }

    pub fn from_csv_str(text: &str, schema: &ColorSchema) -> MatrizResult<Self> {
        Self::from_reader(text.as_bytes(), schema)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, schema: &ColorSchema) -> MatrizResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), schema)
    }

    pub fn records(&self) -> &[ColorRecord] {
        &self.records
    }

    pub fn issues(&self) -> &[CoercionIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered sequences of color names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceCatalog {
    records: Vec<SequenceRecord>,
}

impl SequenceCatalog {
    pub fn from_records(records: Vec<SequenceRecord>) -> Self {
        Self { records }
    }

    pub fn from_reader<R: Read>(input: R) -> MatrizResult<Self> {
        let table = RawTable::read(input, SEQUENCE_CATALOG)?;
        let idx = table.require("sequence", SEQUENCE_CATALOG)?;

        let records = table
            .rows
            .iter()
            .map(|row| {
                let raw = cell(row, idx);
                if raw.trim().is_empty() {
                    SequenceRecord::missing()
                } else {
                    SequenceRecord::new(raw)
                }
            })
            .collect();

        Ok(Self { records })
    }

    pub fn from_csv_str(text: &str) -> MatrizResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Auxiliary semantic mapping; validated and coerced, not used as features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticCatalog {
    records: Vec<SemanticMapping>,
    issues: Vec<CoercionIssue>,
}

impl SemanticCatalog {
    pub fn from_records(records: Vec<SemanticMapping>) -> Self {
        Self {
            records,
            issues: Vec::new(),
        }
    }

    pub fn from_reader<R: Read>(input: R) -> MatrizResult<Self> {
        let table = RawTable::read(input, SEMANTIC_CATALOG)?;
        let channel_idx = ["R", "G", "B"].map(|column| table.column(column));

        let mut issues = Vec::new();
        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut channels = [None; 3];
                for (channel, (idx, column)) in channels
                    .iter_mut()
                    .zip(channel_idx.iter().zip(["R", "G", "B"]))
                {
                    if let Some(idx) = idx {
                        *channel = coerce_number(
                            cell(row, *idx),
                            SEMANTIC_CATALOG,
                            row_idx,
                            column,
                            &mut issues,
                        );
                    }
                }
                let fields = table
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| !channel_idx.contains(&Some(*idx)))
                    .map(|(idx, header)| (header.to_string(), cell(row, idx).to_string()))
                    .collect();
                SemanticMapping {
                    fields,
                    r: channels[0],
                    g: channels[1],
                    b: channels[2],
                }
            })
            .collect();

        Ok(Self { records, issues })
    }

    pub fn from_csv_str(text: &str) -> MatrizResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn records(&self) -> &[SemanticMapping] {
        &self.records
    }

    pub fn issues(&self) -> &[CoercionIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
