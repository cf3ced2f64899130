//! Sequence clustering pipeline.
//!
//! Coercion happens during catalog ingestion; this module takes typed
//! catalogs through featurization, standardization, clustering, projection,
//! summarization and momentum ranking. Every call recomputes everything from
//! its inputs.

use serde::Serialize;

use crate::catalog::{CoercionIssue, ColorCatalog, SemanticCatalog, SequenceCatalog};
use crate::cluster::{self, ClusterAssignment, ClusterSummaries, KMeansParams, Projection};
use crate::config::AnalysisConfig;
use crate::error::{MatrizError, MatrizResult};
use crate::features::{standardize, FeatureMatrix, Vocabulary};
use crate::sequence::{rank_sequences, ColorClusterMap, ScoredSequence};

/// Wire shape of an analysis: cluster summaries and top sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub clusters: ClusterSummaries,
    pub top_sequences: Vec<ScoredSequence>,
}

/// Full result of one analysis, including the artifacts that explain it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceAnalysis {
    pub clusters: ClusterSummaries,
    pub top_sequences: Vec<ScoredSequence>,
    /// Terms that became text feature columns, in column order
    pub vocabulary: Vocabulary,
    pub assignment: ClusterAssignment,
    pub projection: Option<Projection>,
    /// Cells substituted during ingestion of the color and semantic catalogs
    pub coercion_issues: Vec<CoercionIssue>,
}

impl SequenceAnalysis {
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            clusters: self.clusters.clone(),
            top_sequences: self.top_sequences.clone(),
        }
    }

    pub fn into_report(self) -> AnalysisReport {
        AnalysisReport {
            clusters: self.clusters,
            top_sequences: self.top_sequences,
        }
    }
}

/// Runs the pipeline under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SequenceAnalyzer {
    config: AnalysisConfig,
}

impl SequenceAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Cluster `colors` into `k` groups and rank `sequences` by momentum.
    ///
    /// # Errors
    ///
    /// [`MatrizError::EmptyCatalog`] when `colors` has no rows and
    /// [`MatrizError::InvalidClusterCount`] when `k` is outside `[1, rows]`.
    pub fn analyze(
        &self,
        colors: &ColorCatalog,
        sequences: &SequenceCatalog,
        semantic: Option<&SemanticCatalog>,
        k: usize,
    ) -> MatrizResult<SequenceAnalysis> {
        if colors.is_empty() {
            return Err(MatrizError::empty_catalog("color"));
        }
        if k == 0 || k > colors.len() {
            return Err(MatrizError::invalid_cluster_count(k as i64, colors.len()));
        }

        let records = colors.records();
        let vocabulary = Vocabulary::fit(
            records.iter().map(|record| record.word_tags.as_str()),
            self.config.vocabulary_size,
        );
        tracing::debug!(
            "Selected {} vocabulary terms: {:?}",
            vocabulary.len(),
            vocabulary.column_names()
        );

        let features = FeatureMatrix::build(records, &vocabulary);
        let scaled = standardize(features.values());

        let assignment = cluster::fit(&scaled, &KMeansParams::from_config(k, &self.config))?;
        let projection = self
            .config
            .compute_projection
            .then(|| cluster::project(&scaled));

        let clusters = cluster::summarize(records, &assignment.labels, k, self.config.top_colors);
        let color_clusters = ColorClusterMap::from_assignment(records, &assignment.labels);
        let top_sequences = rank_sequences(
            sequences,
            &color_clusters,
            self.config.sequence_delimiter,
            self.config.top_sequences,
        );

        let mut coercion_issues = colors.issues().to_vec();
        if let Some(semantic) = semantic {
            coercion_issues.extend_from_slice(semantic.issues());
        }
        if !coercion_issues.is_empty() {
            tracing::warn!(
                "{} cells could not be read as numbers and were treated as missing",
                coercion_issues.len()
            );
        }

        tracing::info!(
            "Clustered {} colors ({} features) into {} clusters, inertia {:.4}; ranked {} sequences",
            records.len(),
            features.width(),
            k,
            assignment.inertia,
            sequences.len()
        );

        Ok(SequenceAnalysis {
            clusters,
            top_sequences,
            vocabulary,
            assignment,
            projection,
            coercion_issues,
        })
    }
}

/// Run the pipeline with [`AnalysisConfig::default`].
pub fn analyze(
    colors: &ColorCatalog,
    sequences: &SequenceCatalog,
    semantic: Option<&SemanticCatalog>,
    k: usize,
) -> MatrizResult<SequenceAnalysis> {
    SequenceAnalyzer::default().analyze(colors, sequences, semantic, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorRecord, SequenceRecord};

    fn palette() -> ColorCatalog {
        ColorCatalog::from_records(vec![
            ColorRecord::new("red", Some(255.0), Some(0.0), Some(0.0), "passion fire"),
            ColorRecord::new("crimson", Some(220.0), Some(20.0), Some(60.0), "passion blood"),
            ColorRecord::new("blue", Some(0.0), Some(0.0), Some(255.0), "calm sea"),
            ColorRecord::new("navy", Some(0.0), Some(0.0), Some(128.0), "calm night"),
        ])
    }

    #[test]
    fn analyze_partitions_every_row() {
        let sequences = SequenceCatalog::from_records(vec![SequenceRecord::new("red,blue")]);
        let analysis = analyze(&palette(), &sequences, None, 2).unwrap();

        assert_eq!(analysis.k(), 2);
        let total: usize = analysis.clusters.values().map(|c| c.count).sum();
        assert_eq!(total, 4);
        assert_eq!(analysis.assignment.labels.len(), 4);
        assert_eq!(analysis.top_sequences.len(), 1);
    }

    #[test]
    fn analyze_exposes_vocabulary_and_projection() {
        let analysis = analyze(&palette(), &SequenceCatalog::default(), None, 2).unwrap();
        let terms: Vec<&str> = analysis
            .vocabulary
            .terms()
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(terms, vec!["blood", "calm", "fire", "night", "passion", "sea"]);
        assert_eq!(analysis.projection.as_ref().map(Projection::len), Some(4));
        assert!(analysis.top_sequences.is_empty());
    }

    #[test]
    fn projection_can_be_disabled() {
        let config = AnalysisConfig {
            compute_projection: false,
            ..AnalysisConfig::default()
        };
        let analysis = SequenceAnalyzer::new(config)
            .analyze(&palette(), &SequenceCatalog::default(), None, 1)
            .unwrap();
        assert!(analysis.projection.is_none());
    }

    #[test]
    fn analyze_rejects_bad_k_and_empty_catalog() {
        let sequences = SequenceCatalog::default();
        assert!(matches!(
            analyze(&palette(), &sequences, None, 0),
            Err(MatrizError::InvalidClusterCount { .. })
        ));
        assert!(matches!(
            analyze(&palette(), &sequences, None, 5),
            Err(MatrizError::InvalidClusterCount { requested: 5, rows: 4 })
        ));
        assert!(matches!(
            analyze(&ColorCatalog::default(), &sequences, None, 1),
            Err(MatrizError::EmptyCatalog { .. })
        ));
    }

    #[test]
    fn report_serializes_wire_shape() {
        let sequences = SequenceCatalog::from_records(vec![SequenceRecord::new("red,navy")]);
        let report = analyze(&palette(), &sequences, None, 2).unwrap().into_report();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["clusters"]["0"]["count"].is_u64());
        assert!(json["clusters"]["1"]["avgRgb"].is_object());
        assert_eq!(json["topSequences"][0]["sequence"], "red,navy");
        assert!(json.get("vocabulary").is_none());
    }
}
