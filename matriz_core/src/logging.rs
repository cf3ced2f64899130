//! JSON line-delimited run journal.
//!
//! Each completed analysis or similarity build appends one record under
//! `logs/`. Journal writes are best effort for callers; a failure here never
//! invalidates a computed result.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::analysis::SequenceAnalysis;
use crate::similarity::SimilarityTable;

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct AnalysisLogEntry {
    pub k: usize,
    pub rows: usize,
    pub vocabulary: Vec<String>,
    pub cluster_sizes: Vec<usize>,
    pub inertia: f64,
    pub coercion_issues: usize,
    pub top_momentum: Option<f64>,
    pub timestamp_ms: u128,
}

impl AnalysisLogEntry {
    pub fn from_analysis(analysis: &SequenceAnalysis) -> Self {
        Self {
            k: analysis.k(),
            rows: analysis.assignment.labels.len(),
            vocabulary: analysis
                .vocabulary
                .terms()
                .iter()
                .map(|entry| entry.term.clone())
                .collect(),
            cluster_sizes: analysis.clusters.values().map(|c| c.count).collect(),
            inertia: analysis.assignment.inertia,
            coercion_issues: analysis.coercion_issues.len(),
            top_momentum: analysis.top_sequences.first().map(|s| s.momentum),
            timestamp_ms: timestamp_ms(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimilarityLogEntry {
    pub pairs: usize,
    pub max_dot_product: f64,
    pub timestamp_ms: u128,
}

/// Journal rooted at a directory; `logs/` by default.
#[derive(Debug, Clone)]
pub struct Journal {
    dir: PathBuf,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new("logs")
    }
}

impl Journal {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.dir.join("analysis.jsonl")
    }

    pub fn similarity_path(&self) -> PathBuf {
        self.dir.join("similarity.jsonl")
    }

    pub fn log_analysis(&self, analysis: &SequenceAnalysis) -> io::Result<()> {
        append_json_line(
            self.analysis_path(),
            &AnalysisLogEntry::from_analysis(analysis),
        )
    }

    pub fn log_similarity(&self, table: &SimilarityTable) -> io::Result<()> {
        let entry = SimilarityLogEntry {
            pairs: table.len(),
            max_dot_product: table.max_dot_product(),
            timestamp_ms: timestamp_ms(),
        };
        append_json_line(self.similarity_path(), &entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::catalog::{ColorCatalog, ColorRecord, SequenceCatalog, SequenceRecord};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "matriz-journal-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn journal_appends_one_line_per_analysis() {
        let colors = ColorCatalog::from_records(vec![
            ColorRecord::new("red", Some(255.0), Some(0.0), Some(0.0), "fire"),
            ColorRecord::new("blue", Some(0.0), Some(0.0), Some(255.0), "sea"),
        ]);
        let sequences = SequenceCatalog::from_records(vec![SequenceRecord::new("red,blue")]);
        let analysis = analyze(&colors, &sequences, None, 2).unwrap();

        let dir = scratch_dir("analysis");
        let journal = Journal::new(&dir);
        journal.log_analysis(&analysis).unwrap();
        journal.log_analysis(&analysis).unwrap();

        let contents = fs::read_to_string(journal.analysis_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["k"], 2);
        assert_eq!(entry["rows"], 2);
        assert_eq!(entry["vocabulary"][0], "fire");
        assert_eq!(entry["top_momentum"], 1.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn journal_records_similarity_builds() {
        let table = SimilarityTable::from_records(&[ColorRecord::rgb("red", 255.0, 0.0, 0.0)]);
        let dir = scratch_dir("similarity");
        let journal = Journal::new(&dir);
        journal.log_similarity(&table).unwrap();

        let contents = fs::read_to_string(journal.similarity_path()).unwrap();
        let entry: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(entry["pairs"], 1);
        assert_eq!(entry["max_dot_product"], 65025.0);

        let _ = fs::remove_dir_all(&dir);
    }
}
