//! Fusion of channel intensities and binary text features.

use ndarray::Array2;

use super::vocabulary::Vocabulary;
use crate::catalog::ColorRecord;

pub const CHANNEL_COLUMNS: [&str; 3] = ["r", "g", "b"];

/// One row per color record: `[r, g, b, term_0, term_1, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    values: Array2<f64>,
    columns: Vec<String>,
}

impl FeatureMatrix {
    /// Missing channels read as zero; text columns follow `vocabulary` order.
    pub fn build(records: &[ColorRecord], vocabulary: &Vocabulary) -> Self {
        let width = CHANNEL_COLUMNS.len() + vocabulary.len();
        let mut values = Array2::zeros((records.len(), width));

        for (row_idx, record) in records.iter().enumerate() {
            let mut row = values.row_mut(row_idx);
            for (col, value) in record.channels_or_zero().into_iter().enumerate() {
                row[col] = value;
            }
            for (offset, present) in vocabulary.encode(&record.word_tags).into_iter().enumerate() {
                row[CHANNEL_COLUMNS.len() + offset] = present;
            }
        }

        let mut columns: Vec<String> = CHANNEL_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(vocabulary.column_names());

        Self { values, columns }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fuses_channels_and_terms() {
        let records = vec![
            ColorRecord::new("red", Some(255.0), None, Some(0.0), "love fire"),
            ColorRecord::new("blue", Some(0.0), Some(0.0), Some(255.0), "calm"),
        ];
        let vocabulary = Vocabulary::fit(records.iter().map(|r| r.word_tags.as_str()), 100);
        let matrix = FeatureMatrix::build(&records, &vocabulary);

        assert_eq!(
            matrix.columns(),
            ["r", "g", "b", "sentiment_calm", "sentiment_fire", "sentiment_love"]
        );
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.width(), 6);

        let red = matrix.values().row(0).to_vec();
        assert_eq!(red, vec![255.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        let blue = matrix.values().row(1).to_vec();
        assert_eq!(blue, vec![0.0, 0.0, 255.0, 1.0, 0.0, 0.0]);
    }
}
