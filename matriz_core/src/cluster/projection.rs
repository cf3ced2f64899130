//! Two-component principal projection used for cluster diagnostics.
//!
//! Components are found by power iteration on the sample covariance with
//! deflation after each component. Each component's sign is fixed so that
//! its largest-magnitude loading is positive.

use ndarray::{Array1, Array2, Axis};
use serde::Serialize;

const COMPONENTS: usize = 2;
const MAX_ITERATIONS: usize = 500;
const CONVERGENCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Per-row coordinates on the two leading components
    pub coordinates: Vec<[f64; 2]>,
    pub explained_variance: [f64; 2],
    pub explained_variance_ratio: [f64; 2],
}

impl Projection {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Project the rows of `data` onto its two leading principal components.
///
/// Fewer than two rows (or columns) leave the missing components at zero.
pub fn project(data: &Array2<f64>) -> Projection {
    let rows = data.nrows();
    let mut coordinates = vec![[0.0; 2]; rows];
    let mut explained_variance = [0.0; 2];

    if rows < 2 || data.ncols() == 0 {
        return Projection {
            coordinates,
            explained_variance,
            explained_variance_ratio: [0.0; 2],
        };
    }

    let mean = data
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(data.ncols()));
    let centered = data - &mean;
    let mut covariance = centered.t().dot(&centered) / (rows as f64 - 1.0);
    let total_variance: f64 = covariance.diag().sum();

    for component in 0..COMPONENTS.min(data.ncols()) {
        let Some((eigenvalue, vector)) = leading_eigenpair(&covariance) else {
            break;
        };
        explained_variance[component] = eigenvalue;

        let scores = centered.dot(&vector);
        for (row, score) in scores.iter().enumerate() {
            coordinates[row][component] = *score;
        }

        // deflate
        let projector = outer(&vector);
        covariance = covariance - projector * eigenvalue;
    }

    let explained_variance_ratio = if total_variance > 0.0 {
        explained_variance.map(|variance| variance / total_variance)
    } else {
        [0.0; 2]
    };

    Projection {
        coordinates,
        explained_variance,
        explained_variance_ratio,
    }
}

fn leading_eigenpair(matrix: &Array2<f64>) -> Option<(f64, Array1<f64>)> {
    let dim = matrix.nrows();
    let mut vector = Array1::from_shape_fn(dim, |idx| 1.0 + idx as f64 / dim as f64);
    normalize(&mut vector)?;

    for _ in 0..MAX_ITERATIONS {
        let mut next = matrix.dot(&vector);
        if normalize(&mut next).is_none() {
            return None;
        }
        let delta = (&next - &vector).mapv(|d| d * d).sum();
        vector = next;
        if delta < CONVERGENCE {
            break;
        }
    }

    let eigenvalue = vector.dot(&matrix.dot(&vector));
    if eigenvalue <= 0.0 {
        return None;
    }

    let pivot = vector
        .iter()
        .copied()
        .fold(0.0f64, |acc, value| if value.abs() > acc.abs() { value } else { acc });
    if pivot < 0.0 {
        vector.mapv_inplace(|value| -value);
    }

    Some((eigenvalue, vector))
}

fn normalize(vector: &mut Array1<f64>) -> Option<()> {
    let norm = vector.iter().map(|value| value * value).sum::<f64>().sqrt();
    if norm < f64::EPSILON {
        return None;
    }
    vector.mapv_inplace(|value| value / norm);
    Some(())
}

fn outer(vector: &Array1<f64>) -> Array2<f64> {
    let column = vector.view().insert_axis(Axis(1));
    let row = vector.view().insert_axis(Axis(0));
    column.dot(&row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn points_on_a_line_load_on_first_component() {
        let data = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0], [4.0, 8.0]];
        let projection = project(&data);

        assert_eq!(projection.len(), 4);
        assert!((projection.explained_variance_ratio[0] - 1.0).abs() < 1e-9);
        assert!(projection.explained_variance[1].abs() < 1e-9);

        let first: Vec<f64> = projection.coordinates.iter().map(|c| c[0]).collect();
        assert!(first.windows(2).all(|pair| pair[1] > pair[0]));
        assert!(first.iter().sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn explained_variance_is_ordered() {
        let data = array![
            [2.0, 0.1, 0.0],
            [-2.0, -0.1, 0.1],
            [4.0, 0.3, -0.1],
            [-4.0, -0.2, 0.0],
            [0.0, 0.5, 0.0]
        ];
        let projection = project(&data);
        assert!(projection.explained_variance[0] >= projection.explained_variance[1]);
        let ratio_sum: f64 = projection.explained_variance_ratio.iter().sum();
        assert!(ratio_sum <= 1.0 + 1e-9);
    }

    #[test]
    fn single_row_projects_to_origin() {
        let data = array![[1.0, 2.0, 3.0]];
        let projection = project(&data);
        assert_eq!(projection.coordinates, vec![[0.0, 0.0]]);
        assert_eq!(projection.explained_variance, [0.0, 0.0]);
    }
}
