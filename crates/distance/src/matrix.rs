//! Dense symmetric pairwise distance matrix.

use rayon::prelude::*;
use tracing::debug;

use distknn_stats::round_significant;

use crate::dataset::Dataset;
use crate::error::DistanceError;
use crate::metric::{Metric, PairwiseMetric};

/// Number of significant decimal digits kept for every stored distance.
///
/// Rounding makes distances that differ only by floating-point noise compare
/// equal, at any magnitude. Tie detection in neighbor ranking relies on it.
pub const DISTANCE_DIGITS: i32 = 15;

/// Immutable `n × n` matrix of pairwise distances between all cases of a dataset.
///
/// The diagonal is exactly zero, every entry is finite and non-negative, and
/// `get(i, j) == get(j, i)` holds bit-for-bit. Build it once and share it (by
/// reference or `Arc`) across any number of prediction calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    /// Row-major `[n × n]`.
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise distances of `dataset` under a built-in metric.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::InvalidMinkowskiPower`] if the metric
    /// parameters are invalid.
    #[tracing::instrument(skip_all, fields(n_cases = dataset.n_cases(), metric = %metric))]
    pub fn build(dataset: &Dataset, metric: &Metric) -> Result<Self, DistanceError> {
        metric.validate()?;
        Self::build_with(dataset, metric)
    }

    /// Computes all pairwise distances of `dataset` under any [`PairwiseMetric`].
    ///
    /// Only the upper triangle is evaluated (rows in parallel); the lower
    /// triangle mirrors it, so the result is exactly symmetric even when the
    /// metric is not.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::InvalidDistance`] if the metric yields a
    /// negative or non-finite value.
    #[tracing::instrument(skip_all, fields(n_cases = dataset.n_cases()))]
    pub fn build_with<M>(dataset: &Dataset, metric: &M) -> Result<Self, DistanceError>
    where
        M: PairwiseMetric + ?Sized,
    {
        let n = dataset.n_cases();

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = dataset.case(i);
                ((i + 1)..n)
                    .map(|j| metric.distance(a, dataset.case(j)))
                    .collect()
            })
            .collect();

        let mut values = vec![0.0; n * n];
        for (i, row) in upper.iter().enumerate() {
            for (offset, &d) in row.iter().enumerate() {
                let j = i + 1 + offset;
                if !d.is_finite() || d < 0.0 {
                    return Err(DistanceError::InvalidDistance { i, j, value: d });
                }
                let d = round_significant(d, DISTANCE_DIGITS);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }

        debug!(n_pairs = n * n.saturating_sub(1) / 2, "distance matrix built");
        Ok(Self { n, values })
    }

    /// Adopts an externally computed row-major `[n × n]` matrix.
    ///
    /// Entries are rounded like computed ones.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::EmptyDataset`] if `n == 0`,
    /// [`DistanceError::NotSquare`] on a length mismatch,
    /// [`DistanceError::InvalidDistance`] on negative or non-finite entries,
    /// [`DistanceError::NonZeroDiagonal`] and [`DistanceError::Asymmetric`]
    /// when the matrix is not a valid distance matrix.
    pub fn from_square(values: Vec<f64>, n: usize) -> Result<Self, DistanceError> {
        if n == 0 {
            return Err(DistanceError::EmptyDataset);
        }
        if values.len() != n * n {
            return Err(DistanceError::NotSquare {
                len: values.len(),
                n,
            });
        }

        for i in 0..n {
            if values[i * n + i] != 0.0 {
                return Err(DistanceError::NonZeroDiagonal { i });
            }
            for j in (i + 1)..n {
                let d = values[i * n + j];
                if !d.is_finite() || d < 0.0 {
                    return Err(DistanceError::InvalidDistance { i, j, value: d });
                }
                if values[j * n + i] != d {
                    return Err(DistanceError::Asymmetric { i, j });
                }
            }
        }

        let values = values
            .into_iter()
            .map(|d| round_significant(d, DISTANCE_DIGITS))
            .collect();
        Ok(Self { n, values })
    }

    /// Returns the number of cases (side length).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the distance between cases `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index out of range");
        self.values[i * self.n + j]
    }

    /// Returns all distances from case `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Writes the distances from case `row` to each case in `cols` into `out`,
    /// in `cols` order. `out` is cleared first.
    ///
    /// # Panics
    ///
    /// Panics if `row` or any column is out of range.
    pub fn gather_row(&self, row: usize, cols: &[usize], out: &mut Vec<f64>) {
        let r = self.row(row);
        out.clear();
        out.extend(cols.iter().map(|&j| r[j]));
    }

    /// Returns the row-major `[n × n]` buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }
}
