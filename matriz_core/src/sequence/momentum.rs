//! Sequence parsing, momentum scoring and ranking.

use std::cmp::Ordering;

use serde::Serialize;

use super::mapping::ColorClusterMap;
use crate::catalog::{normalize_name, SequenceCatalog};

/// A sequence with its momentum, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSequence {
    /// Raw source string; empty when the source cell was missing
    pub sequence: String,
    pub momentum: f64,
}

/// Split a delimited color list into normalized tokens.
///
/// Empty tokens between consecutive delimiters are kept; they never resolve
/// to a cluster but still count toward the sequence length.
pub fn parse_sequence(raw: Option<&str>, delimiter: char) -> Vec<String> {
    match raw {
        Some(text) if !text.trim().is_empty() => {
            text.split(delimiter).map(normalize_name).collect()
        }
        _ => Vec::new(),
    }
}

/// Fraction of adjacent pairs whose clusters differ.
///
/// Only pairs where both tokens resolve contribute a transition, while the
/// denominator is the raw number of adjacent pairs, floored at one.
pub fn momentum(sequence: &[String], clusters: &ColorClusterMap) -> f64 {
    let transitions = sequence
        .windows(2)
        .filter(|pair| match (clusters.get(&pair[0]), clusters.get(&pair[1])) {
            (Some(from), Some(to)) => from != to,
            _ => false,
        })
        .count();

    let pairs = sequence.len().saturating_sub(1).max(1);
    transitions as f64 / pairs as f64
}

/// Score every sequence and keep the `limit` highest, ties in input order.
pub fn rank_sequences(
    catalog: &SequenceCatalog,
    clusters: &ColorClusterMap,
    delimiter: char,
    limit: usize,
) -> Vec<ScoredSequence> {
    let mut scored: Vec<ScoredSequence> = catalog
        .records()
        .iter()
        .map(|record| {
            let raw = record.sequence.as_deref();
            let tokens = parse_sequence(raw, delimiter);
            ScoredSequence {
                sequence: raw.unwrap_or_default().to_string(),
                momentum: momentum(&tokens, clusters),
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.momentum
            .partial_cmp(&a.momentum)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SequenceRecord;

    fn red_blue() -> ColorClusterMap {
        ColorClusterMap::from_pairs([("red", 0), ("blue", 1)])
    }

    #[test]
    fn parse_trims_and_lowercases() {
        assert_eq!(
            parse_sequence(Some(" Red , BLUE,green "), ','),
            vec!["red", "blue", "green"]
        );
        assert_eq!(parse_sequence(Some("red,,blue"), ',').len(), 3);
        assert!(parse_sequence(None, ',').is_empty());
        assert!(parse_sequence(Some("   "), ',').is_empty());
    }

    #[test]
    fn half_of_transitions_cross() {
        let tokens = parse_sequence(Some("red,red,blue"), ',');
        assert_eq!(momentum(&tokens, &red_blue()), 0.5);
    }

    #[test]
    fn every_pair_crossing_scores_one() {
        let tokens = parse_sequence(Some("red,blue,red,blue"), ',');
        assert_eq!(momentum(&tokens, &red_blue()), 1.0);
    }

    #[test]
    fn short_sequences_score_zero() {
        let map = red_blue();
        assert_eq!(momentum(&[], &map), 0.0);
        assert_eq!(momentum(&["red".to_string()], &map), 0.0);
        let unresolved = parse_sequence(Some("red,mauve"), ',');
        assert_eq!(momentum(&unresolved, &map), 0.0);
    }

    #[test]
    fn unresolved_tokens_keep_denominator() {
        // pairs: (red, mauve) skipped, (mauve, blue) skipped, (blue, red) crosses
        let tokens = parse_sequence(Some("red,mauve,blue,red"), ',');
        assert!((momentum(&tokens, &red_blue()) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_is_stable_and_truncated() {
        let catalog = SequenceCatalog::from_records(vec![
            SequenceRecord::new("red,red"),
            SequenceRecord::new("red,blue"),
            SequenceRecord::missing(),
            SequenceRecord::new("blue,red"),
            SequenceRecord::new("red,red,blue"),
        ]);
        let ranked = rank_sequences(&catalog, &red_blue(), ',', 3);
        let order: Vec<(&str, f64)> = ranked
            .iter()
            .map(|s| (s.sequence.as_str(), s.momentum))
            .collect();
        assert_eq!(
            order,
            vec![("red,blue", 1.0), ("blue,red", 1.0), ("red,red,blue", 0.5)]
        );
    }

    #[test]
    fn custom_delimiter() {
        let tokens = parse_sequence(Some("red;blue"), ';');
        assert_eq!(momentum(&tokens, &red_blue()), 1.0);
    }
}
