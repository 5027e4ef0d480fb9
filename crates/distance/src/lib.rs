//! Dense pairwise distance matrices.
//!
//! A [`DistanceMatrix`] is computed once from a [`Dataset`] and a metric, then
//! shared read-only by every prediction call. Distances are rounded to
//! [`DISTANCE_DIGITS`] significant digits so that ties survive floating-point
//! noise.
//!
//! # Quick start
//!
//! ```
//! use distknn_distance::{Dataset, DistanceMatrix, Metric};
//!
//! let dataset = Dataset::from_rows(&[[0.0], [1.0], [2.0], [10.0]]).unwrap();
//! let matrix = DistanceMatrix::build(&dataset, &Metric::Euclidean).unwrap();
//!
//! assert_eq!(matrix.row(3), &[10.0, 9.0, 8.0, 0.0]);
//! ```
//!
//! Any `Fn(&[f64], &[f64]) -> f64 + Sync` closure can stand in for a built-in
//! metric through [`DistanceMatrix::build_with`].

pub mod dataset;
pub mod error;
pub mod matrix;
pub mod metric;

pub use dataset::Dataset;
pub use error::DistanceError;
pub use matrix::{DISTANCE_DIGITS, DistanceMatrix};
pub use metric::{DEFAULT_MINKOWSKI_P, Metric, PairwiseMetric};

/// Builds a distance matrix from a metric name and its power parameter.
///
/// `p` is only used by `"minkowski"`; pass [`DEFAULT_MINKOWSKI_P`] otherwise.
///
/// # Errors
///
/// Returns [`DistanceError::InvalidMetric`] for an unknown name, and any error
/// from [`Metric::from_name`] or [`DistanceMatrix::build`].
pub fn build_distance_matrix(
    dataset: &Dataset,
    metric_name: &str,
    p: f64,
) -> Result<DistanceMatrix, DistanceError> {
    let metric = Metric::from_name(metric_name, p)?;
    DistanceMatrix::build(dataset, &metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_distance_matrix_by_name() {
        let ds = Dataset::from_rows(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
        let m = build_distance_matrix(&ds, "euclidean", DEFAULT_MINKOWSKI_P).unwrap();
        assert_eq!(m.get(0, 1), 5.0);

        let m = build_distance_matrix(&ds, "manhattan", DEFAULT_MINKOWSKI_P).unwrap();
        assert_eq!(m.get(0, 1), 7.0);
    }

    #[test]
    fn test_build_distance_matrix_unknown_metric() {
        let ds = Dataset::from_rows(&[[0.0], [1.0]]).unwrap();
        let result = build_distance_matrix(&ds, "hamming", 2.0);
        assert!(matches!(result, Err(DistanceError::InvalidMetric { .. })));
    }
}
