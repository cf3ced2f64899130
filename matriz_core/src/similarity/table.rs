//! All-pairs dot-product table over color channel triples.
//!
//! The table is built once from a catalog and only read afterwards. Keys are
//! stored in catalog row order (`i <= j`), so lookups try both orderings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_name, ColorCatalog, ColorRecord};
use crate::error::{MatrizError, MatrizResult};

/// Dot product of two channel triples.
#[inline]
pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Successful similarity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityScore {
    pub dot_product: f64,
    /// `dot_product / max_dot_product * 100`, rounded to two decimals.
    pub similarity_percentile: f64,
}

/// Wire shape of a lookup: either a score or an error description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimilarityOutcome {
    Score(SimilarityScore),
    Failure { error: String },
}

impl From<MatrizResult<SimilarityScore>> for SimilarityOutcome {
    fn from(result: MatrizResult<SimilarityScore>) -> Self {
        match result {
            Ok(score) => SimilarityOutcome::Score(score),
            Err(err) => SimilarityOutcome::Failure {
                error: err.to_string(),
            },
        }
    }
}

/// Precomputed pairwise dot products plus their global maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityTable {
    dot_products: HashMap<(String, String), f64>,
    max_dot_product: f64,
}

impl SimilarityTable {
    /// Build the table from a catalog.
    ///
    /// Rows missing any channel are dropped. Every pair `(i, j)` with
    /// `i <= j` is stored, self-pairs included. When two rows share a
    /// normalized name the later pair overwrites the earlier one.
    pub fn precompute(catalog: &ColorCatalog) -> Self {
        Self::from_records(catalog.records())
    }

    pub fn from_records(records: &[ColorRecord]) -> Self {
        let colors: Vec<(String, [f64; 3])> = records
            .iter()
            .filter_map(|record| record.channels().map(|rgb| (record.key(), rgb)))
            .collect();

        let dropped = records.len() - colors.len();
        if dropped > 0 {
            tracing::debug!("Dropped {dropped} colors with undefined channels before precompute");
        }

        let mut dot_products = HashMap::with_capacity(colors.len() * (colors.len() + 1) / 2);
        let mut max_dot_product = 0.0f64;

        for i in 0..colors.len() {
            for j in i..colors.len() {
                let (name_i, rgb_i) = &colors[i];
                let (name_j, rgb_j) = &colors[j];
                let value = dot(rgb_i, rgb_j);
                dot_products.insert((name_i.clone(), name_j.clone()), value);
                if value > max_dot_product {
                    max_dot_product = value;
                }
            }
        }

        tracing::info!(
            "Precomputed {} color pairs from {} colors (max dot product {})",
            dot_products.len(),
            colors.len(),
            max_dot_product
        );

        Self {
            dot_products,
            max_dot_product,
        }
    }

    pub fn max_dot_product(&self) -> f64 {
        self.max_dot_product
    }

    pub fn len(&self) -> usize {
        self.dot_products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dot_products.is_empty()
    }

    /// Stored value for the pair in exactly the given order.
    pub fn get(&self, first: &str, second: &str) -> Option<f64> {
        self.dot_products
            .get(&(first.to_string(), second.to_string()))
            .copied()
    }

    /// Dot product for a pair in either order; names are normalized first.
    pub fn dot_product(&self, first: &str, second: &str) -> Option<f64> {
        let first = normalize_name(first);
        let second = normalize_name(second);
        self.get(&first, &second)
            .or_else(|| self.get(&second, &first))
    }

    /// Score a pair against the global maximum.
    pub fn lookup(&self, first: &str, second: &str) -> MatrizResult<SimilarityScore> {
        let dot_product = self
            .dot_product(first, second)
            .ok_or_else(|| MatrizError::pair_not_found(normalize_name(first), normalize_name(second)))?;

        if !(self.max_dot_product.is_finite() && self.max_dot_product > 0.0)
            || !dot_product.is_finite()
        {
            return Err(MatrizError::PercentileUndefined { dot_product });
        }

        let percentile = dot_product / self.max_dot_product * 100.0;
        Ok(SimilarityScore {
            dot_product,
            similarity_percentile: round_to(percentile, 2),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &f64)> {
        self.dot_products.iter()
    }
}

/// Round to `decimals` places, halves to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
