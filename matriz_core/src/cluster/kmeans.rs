//! Seeded k-means with k-means++ initialization and multiple restarts.
//!
//! A single RNG seeded from [`KMeansParams::seed`] drives every restart, so
//! identical inputs always produce identical assignments. The run with the
//! lowest inertia wins; on equal inertia the earlier run is kept.

use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{MatrizError, MatrizResult};

/// Parameters of one clustering call.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansParams {
    pub k: usize,
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    /// Convergence threshold relative to the mean per-column variance
    pub tolerance: f64,
}

impl KMeansParams {
    pub fn new(k: usize) -> Self {
        Self::from_config(k, &AnalysisConfig::default())
    }

    pub fn from_config(k: usize, config: &AnalysisConfig) -> Self {
        Self {
            k,
            seed: config.seed,
            restarts: config.restarts.max(1),
            max_iterations: config.max_iterations.max(1),
            tolerance: config.tolerance,
        }
    }
}

/// Row-to-cluster labels of the best run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAssignment {
    pub labels: Vec<usize>,
    #[serde(skip)]
    pub centroids: Array2<f64>,
    /// Sum of squared distances from each row to its centroid
    pub inertia: f64,
    pub iterations: usize,
}

impl ClusterAssignment {
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn label(&self, row: usize) -> Option<usize> {
        self.labels.get(row).copied()
    }

    /// Member count of every cluster id in `[0, k)`.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Partition the rows of `data` into exactly `params.k` clusters.
pub fn fit(data: &Array2<f64>, params: &KMeansParams) -> MatrizResult<ClusterAssignment> {
    let rows = data.nrows();
    if params.k == 0 || params.k > rows {
        return Err(MatrizError::invalid_cluster_count(params.k as i64, rows));
    }

    let tolerance = absolute_tolerance(data, params.tolerance);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut best: Option<ClusterAssignment> = None;

    for run in 0..params.restarts.max(1) {
        let candidate = lloyd(data, params, tolerance, &mut rng);
        tracing::trace!(
            "k-means run {run}: inertia {:.6} after {} iterations",
            candidate.inertia,
            candidate.iterations
        );
        let better = best
            .as_ref()
            .map_or(true, |current| candidate.inertia < current.inertia);
        if better {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| MatrizError::invalid_cluster_count(params.k as i64, rows))
}

fn absolute_tolerance(data: &Array2<f64>, relative: f64) -> f64 {
    if data.ncols() == 0 {
        return 0.0;
    }
    let mean_variance = data.var_axis(Axis(0), 0.0).mean().unwrap_or(0.0);
    mean_variance * relative
}

fn lloyd(
    data: &Array2<f64>,
    params: &KMeansParams,
    tolerance: f64,
    rng: &mut StdRng,
) -> ClusterAssignment {
    let rows = data.nrows();
    let mut centroids = init_plus_plus(data, params.k, rng);
    let mut labels = vec![0usize; rows];
    let mut distances = vec![0.0f64; rows];
    let mut iterations = 0;

    for _ in 0..params.max_iterations {
        iterations += 1;
        assign(data, &centroids, &mut labels, &mut distances);

        let mut updated = means(data, &labels, params.k);
        relocate_empty(data, &mut updated, &mut labels, &mut distances);

        let shift: f64 = (&updated - &centroids).mapv(|d| d * d).sum();
        centroids = updated;
        if shift <= tolerance {
            break;
        }
    }

    let inertia = assign(data, &centroids, &mut labels, &mut distances);
    ClusterAssignment {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn init_plus_plus(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let rows = data.nrows();
    let mut centroids = Array2::zeros((k, data.ncols()));

    let first = rng.gen_range(0..rows);
    centroids.row_mut(0).assign(&data.row(first));
    let mut closest: Vec<f64> = data
        .outer_iter()
        .map(|row| squared_distance(row, data.row(first)))
        .collect();

    for c in 1..k {
        let total: f64 = closest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut pick = None;
            for (idx, &weight) in closest.iter().enumerate() {
                if weight <= 0.0 {
                    continue;
                }
                pick = Some(idx);
                if target < weight {
                    break;
                }
                target -= weight;
            }
            pick.unwrap_or(0)
        } else {
            // every point coincides with a chosen centroid
            rng.gen_range(0..rows)
        };

        centroids.row_mut(c).assign(&data.row(chosen));
        for (idx, row) in data.outer_iter().enumerate() {
            let distance = squared_distance(row, data.row(chosen));
            if distance < closest[idx] {
                closest[idx] = distance;
            }
        }
    }

    centroids
}

/// Label every row with its nearest centroid and return the inertia.
fn assign(
    data: &Array2<f64>,
    centroids: &Array2<f64>,
    labels: &mut [usize],
    distances: &mut [f64],
) -> f64 {
    let mut inertia = 0.0;
    for (idx, row) in data.outer_iter().enumerate() {
        let mut best_label = 0;
        let mut best_distance = f64::INFINITY;
        for (label, centroid) in centroids.outer_iter().enumerate() {
            let distance = squared_distance(row, centroid);
            if distance < best_distance {
                best_distance = distance;
                best_label = label;
            }
        }
        labels[idx] = best_label;
        distances[idx] = best_distance;
        inertia += best_distance;
    }
    inertia
}

fn means(data: &Array2<f64>, labels: &[usize], k: usize) -> Array2<f64> {
    let mut sums = Array2::zeros((k, data.ncols()));
    let mut counts = vec![0usize; k];
    for (row, &label) in data.outer_iter().zip(labels) {
        let mut target = sums.row_mut(label);
        target += &row;
        counts[label] += 1;
    }
    for (label, count) in counts.into_iter().enumerate() {
        if count > 0 {
            sums.row_mut(label).mapv_inplace(|v| v / count as f64);
        }
    }
    sums
}

/// Move each empty cluster onto the row farthest from its current centroid.
fn relocate_empty(
    data: &Array2<f64>,
    centroids: &mut Array2<f64>,
    labels: &mut [usize],
    distances: &mut [f64],
) {
    let k = centroids.nrows();
    let mut counts = vec![0usize; k];
    for &label in labels.iter() {
        counts[label] += 1;
    }

    for cluster in 0..k {
        if counts[cluster] > 0 {
            continue;
        }
        let far = distances
            .iter()
            .enumerate()
            .filter(|(idx, _)| counts[labels[*idx]] > 1)
            .fold(None, |acc: Option<(usize, f64)>, (idx, &distance)| match acc {
                Some((_, best)) if best >= distance => acc,
                _ => Some((idx, distance)),
            });
        let Some((idx, _)) = far else {
            continue;
        };

        counts[labels[idx]] -= 1;
        counts[cluster] += 1;
        labels[idx] = cluster;
        distances[idx] = 0.0;
        centroids.row_mut(cluster).assign(&data.row(idx));
    }
}

#[inline]
fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn blobs() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [0.1, 0.2],
            [0.2, 0.1],
            [10.0, 10.0],
            [10.1, 9.9],
            [9.9, 10.2],
            [-10.0, 10.0],
            [-10.2, 9.8],
        ]
    }

    #[test]
    fn separates_well_spaced_blobs() {
        let result = fit(&blobs(), &KMeansParams::new(3)).unwrap();
        let labels = &result.labels;
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_eq!(labels[6], labels[7]);
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[0], labels[6]);
        assert_ne!(labels[3], labels[6]);
        let mut sizes = result.sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![2, 3, 3]);
    }

    #[test]
    fn same_seed_same_labels() {
        let params = KMeansParams::new(3);
        let a = fit(&blobs(), &params).unwrap();
        let b = fit(&blobs(), &params).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn rejects_out_of_range_k() {
        let data = blobs();
        assert!(matches!(
            fit(&data, &KMeansParams::new(0)),
            Err(MatrizError::InvalidClusterCount { requested: 0, rows: 8 })
        ));
        assert!(matches!(
            fit(&data, &KMeansParams::new(9)),
            Err(MatrizError::InvalidClusterCount { requested: 9, rows: 8 })
        ));
    }

    #[test]
    fn k_equal_to_rows_gives_singletons() {
        let data = array![[0.0], [5.0], [10.0]];
        let result = fit(&data, &KMeansParams::new(3)).unwrap();
        let mut sizes = result.sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 1]);
        assert!(result.inertia.abs() < 1e-12);
    }

    #[test]
    fn duplicate_points_still_yield_k_labels_in_range() {
        let data = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
        let result = fit(&data, &KMeansParams::new(3)).unwrap();
        assert_eq!(result.k(), 3);
        assert!(result.labels.iter().all(|&label| label < 3));
        assert_eq!(result.sizes().iter().sum::<usize>(), 4);
    }

    #[test]
    fn single_cluster_centroid_is_mean() {
        let data = array![[0.0, 2.0], [2.0, 4.0]];
        let result = fit(&data, &KMeansParams::new(1)).unwrap();
        assert_eq!(result.labels, vec![0, 0]);
        assert!((result.centroids[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((result.centroids[[0, 1]] - 3.0).abs() < 1e-12);
        assert!((result.inertia - 4.0).abs() < 1e-12);
    }
}
