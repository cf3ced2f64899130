//! Resolution of color names to cluster ids.

use std::collections::HashMap;

use crate::catalog::{normalize_name, ColorRecord};

/// Lower-cased color name to cluster id.
///
/// Clustering is per row, so one name can land in several clusters; the
/// last row carrying a name decides its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorClusterMap {
    clusters: HashMap<String, usize>,
}

impl ColorClusterMap {
    pub fn from_assignment(records: &[ColorRecord], labels: &[usize]) -> Self {
        let clusters = records
            .iter()
            .zip(labels)
            .map(|(record, &label)| (record.key(), label))
            .collect();
        Self { clusters }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        Self {
            clusters: pairs
                .into_iter()
                .map(|(name, cluster)| (normalize_name(name.as_ref()), cluster))
                .collect(),
        }
    }

    /// Cluster of an already normalized name.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.clusters.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_row_wins_for_duplicate_names() {
        let records = vec![
            ColorRecord::rgb("Red", 255.0, 0.0, 0.0),
            ColorRecord::rgb("blue", 0.0, 0.0, 255.0),
            ColorRecord::rgb("red", 250.0, 5.0, 5.0),
        ];
        let map = ColorClusterMap::from_assignment(&records, &[0, 1, 2]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("red"), Some(2));
        assert_eq!(map.get("blue"), Some(1));
        assert_eq!(map.get("Red"), None);
    }
}
