//! Per-column standardization fitted and applied within one call.

use ndarray::{Array1, Array2, Axis};

/// Column means and scales of a feature matrix.
///
/// Scales are population standard deviations; a constant column keeps a
/// scale of one so it is only centered.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Standardizer {
    pub fn fit(values: &Array2<f64>) -> Self {
        let width = values.ncols();
        if values.nrows() == 0 {
            return Self {
                mean: Array1::zeros(width),
                scale: Array1::ones(width),
            };
        }

        let mean = values
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(width));
        let scale = values
            .var_axis(Axis(0), 0.0)
            .mapv(|variance| {
                let std = variance.sqrt();
                if std < 10.0 * f64::EPSILON {
                    1.0
                } else {
                    std
                }
            });

        Self { mean, scale }
    }

    pub fn transform(&self, values: &Array2<f64>) -> Array2<f64> {
        (values - &self.mean) / &self.scale
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

/// Fit and apply a [`Standardizer`] in one step.
pub fn standardize(values: &Array2<f64>) -> Array2<f64> {
    Standardizer::fit(values).transform(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let values = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let scaled = standardize(&values);

        for col in scaled.axis_iter(Axis(1)) {
            let mean = col.mean().unwrap();
            let var = col.var(0.0);
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_is_centered_only() {
        let values = array![[5.0, 1.0], [5.0, 3.0]];
        let standardizer = Standardizer::fit(&values);
        assert_eq!(standardizer.scale()[0], 1.0);

        let scaled = standardizer.transform(&values);
        assert_eq!(scaled[[0, 0]], 0.0);
        assert_eq!(scaled[[1, 0]], 0.0);
        assert_eq!(scaled[[0, 1]], -1.0);
        assert_eq!(scaled[[1, 1]], 1.0);
    }
}
