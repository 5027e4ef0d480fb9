//! Row-major numeric dataset.

use crate::error::DistanceError;

/// An ordered collection of cases, each with the same number of numeric features.
///
/// Stored as a flat row-major buffer `[n_cases × n_features]`. Row order is the
/// index space shared by the distance matrix and every train/test index set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
    n_features: usize,
}

impl Dataset {
    /// Builds a dataset from one vector per case.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::EmptyDataset`] if there are no rows or the
    /// first row is empty, [`DistanceError::DimensionMismatch`] if rows have
    /// differing lengths, and [`DistanceError::NonFiniteInput`] on NaN or
    /// infinity.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, DistanceError> {
        let first = rows.first().ok_or(DistanceError::EmptyDataset)?;
        let n_features = first.as_ref().len();
        if n_features == 0 {
            return Err(DistanceError::EmptyDataset);
        }

        let mut values = Vec::with_capacity(rows.len() * n_features);
        for (row, case) in rows.iter().enumerate() {
            let case = case.as_ref();
            if case.len() != n_features {
                return Err(DistanceError::DimensionMismatch {
                    row,
                    expected: n_features,
                    got: case.len(),
                });
            }
            values.extend_from_slice(case);
        }

        Self::from_flat(values, n_features)
    }

    /// Builds a dataset from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::ShapeMismatch`] if `values.len()` is not a
    /// multiple of `n_features`, [`DistanceError::EmptyDataset`] if the buffer
    /// is empty, and [`DistanceError::NonFiniteInput`] on NaN or infinity.
    pub fn from_flat(values: Vec<f64>, n_features: usize) -> Result<Self, DistanceError> {
        if n_features == 0 || !values.len().is_multiple_of(n_features) {
            return Err(DistanceError::ShapeMismatch {
                len: values.len(),
                n_features,
            });
        }
        if values.is_empty() {
            return Err(DistanceError::EmptyDataset);
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DistanceError::NonFiniteInput {
                row: pos / n_features,
            });
        }
        Ok(Self { values, n_features })
    }

    /// Returns the number of cases.
    pub fn n_cases(&self) -> usize {
        self.values.len() / self.n_features
    }

    /// Returns the number of features per case.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns the features of case `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_cases()`.
    pub fn case(&self, i: usize) -> &[f64] {
        &self.values[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Returns the flat row-major buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(ds.n_cases(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.case(1), &[3.0, 4.0]);
        assert_eq!(ds.as_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_arrays() {
        let ds = Dataset::from_rows(&[[0.0], [1.0], [2.0], [10.0]]).unwrap();
        assert_eq!(ds.n_cases(), 4);
        assert_eq!(ds.case(3), &[10.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]);
        assert!(matches!(
            result,
            Err(DistanceError::DimensionMismatch {
                row: 2,
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_from_rows_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            Dataset::from_rows(&rows),
            Err(DistanceError::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::from_rows(&[Vec::<f64>::new()]),
            Err(DistanceError::EmptyDataset)
        ));
    }

    #[test]
    fn test_from_flat_shape() {
        let result = Dataset::from_flat(vec![1.0, 2.0, 3.0], 2);
        assert!(matches!(
            result,
            Err(DistanceError::ShapeMismatch {
                len: 3,
                n_features: 2
            })
        ));
        assert!(matches!(
            Dataset::from_flat(vec![1.0], 0),
            Err(DistanceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_flat_non_finite() {
        let result = Dataset::from_flat(vec![1.0, 2.0, 3.0, f64::NAN], 2);
        assert!(matches!(
            result,
            Err(DistanceError::NonFiniteInput { row: 1 })
        ));
    }
}
