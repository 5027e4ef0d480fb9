//! Output types for prediction and class-probability calls.

/// Per-test-case predictions, typed by the response kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionValues {
    /// Predicted categories (majority vote).
    Categories(Vec<String>),
    /// Predicted values (continuous reducers).
    Values(Vec<f64>),
}

/// Result of a [`predict`](crate::predict) call.
///
/// Rows follow the ascending order of the test indices, whatever order the
/// caller supplied them in.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnPredictions {
    /// Sorted test indices; row `i` predicts case `test_indices[i]`.
    test_indices: Vec<usize>,
    /// Size of each test case's neighbor set (may differ from k under min/max ties).
    neighbor_counts: Vec<usize>,
    values: PredictionValues,
}

impl KnnPredictions {
    pub(crate) fn new(
        test_indices: Vec<usize>,
        neighbor_counts: Vec<usize>,
        values: PredictionValues,
    ) -> Self {
        Self {
            test_indices,
            neighbor_counts,
            values,
        }
    }

    /// Returns the sorted test indices.
    pub fn test_indices(&self) -> &[usize] {
        &self.test_indices
    }

    /// Returns the neighbor-set size used for each test case.
    pub fn neighbor_counts(&self) -> &[usize] {
        &self.neighbor_counts
    }

    /// Returns the predictions.
    pub fn values(&self) -> &PredictionValues {
        &self.values
    }

    /// Returns predicted categories, or `None` for continuous predictions.
    pub fn categories(&self) -> Option<&[String]> {
        match &self.values {
            PredictionValues::Categories(c) => Some(c),
            PredictionValues::Values(_) => None,
        }
    }

    /// Returns predicted values, or `None` for categorical predictions.
    pub fn continuous(&self) -> Option<&[f64]> {
        match &self.values {
            PredictionValues::Categories(_) => None,
            PredictionValues::Values(v) => Some(v),
        }
    }

    /// Returns the number of test cases.
    pub fn len(&self) -> usize {
        self.test_indices.len()
    }

    /// Returns `true` if there are no test cases.
    pub fn is_empty(&self) -> bool {
        self.test_indices.is_empty()
    }
}

/// Result of a [`predict_probabilities`](crate::predict_probabilities) call.
///
/// A row-major `[n_test × n_categories]` table of vote proportions. Columns
/// follow the category universe order; every row sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    categories: Vec<String>,
    test_indices: Vec<usize>,
    neighbor_counts: Vec<usize>,
    probs: Vec<f64>,
}

impl ClassProbabilities {
    pub(crate) fn new(
        categories: Vec<String>,
        test_indices: Vec<usize>,
        neighbor_counts: Vec<usize>,
        probs: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(probs.len(), categories.len() * test_indices.len());
        Self {
            categories,
            test_indices,
            neighbor_counts,
            probs,
        }
    }

    /// Returns the category universe (column order).
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the sorted test indices (row order).
    pub fn test_indices(&self) -> &[usize] {
        &self.test_indices
    }

    /// Returns the neighbor-set size (the denominator) for each test case.
    pub fn neighbor_counts(&self) -> &[usize] {
        &self.neighbor_counts
    }

    /// Returns the number of test cases.
    pub fn n_rows(&self) -> usize {
        self.test_indices.len()
    }

    /// Returns the probabilities for row `i`, in category order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        let n_cat = self.categories.len();
        &self.probs[i * n_cat..(i + 1) * n_cat]
    }

    /// Iterates over rows in test-index order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows()).map(move |i| self.row(i))
    }

    /// Returns the probability of `category` for row `i`, or `None` if the
    /// row or category does not exist.
    pub fn get(&self, i: usize, category: &str) -> Option<f64> {
        if i >= self.n_rows() {
            return None;
        }
        let col = self.categories.iter().position(|c| c == category)?;
        Some(self.row(i)[col])
    }

    /// Returns the flat row-major buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.probs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_accessors() {
        let p = KnnPredictions::new(
            vec![2, 5],
            vec![3, 4],
            PredictionValues::Categories(vec!["a".to_string(), "b".to_string()]),
        );
        assert_eq!(p.test_indices(), &[2, 5]);
        assert_eq!(p.neighbor_counts(), &[3, 4]);
        assert_eq!(p.categories().unwrap(), &["a", "b"]);
        assert!(p.continuous().is_none());
        assert_eq!(p.len(), 2);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_continuous_accessor() {
        let p = KnnPredictions::new(vec![0], vec![2], PredictionValues::Values(vec![1.5]));
        assert_eq!(p.continuous().unwrap(), &[1.5]);
        assert!(p.categories().is_none());
    }

    #[test]
    fn test_probability_rows() {
        let probs = ClassProbabilities::new(
            vec!["x".to_string(), "y".to_string()],
            vec![1, 4],
            vec![2, 2],
            vec![0.5, 0.5, 1.0, 0.0],
        );
        assert_eq!(probs.n_rows(), 2);
        assert_eq!(probs.row(1), &[1.0, 0.0]);
        assert_eq!(probs.get(0, "y"), Some(0.5));
        assert_eq!(probs.get(0, "z"), None);
        assert_eq!(probs.get(2, "x"), None);
        assert_eq!(probs.rows().count(), 2);
        assert_eq!(probs.as_flat().len(), 4);
    }
}
