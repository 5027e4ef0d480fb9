//! Error types for the distknn-distance crate.

/// Error type for all fallible operations in the distknn-distance crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DistanceError {
    /// Returned when a metric name is not recognised.
    #[error("unknown distance metric: {name:?}")]
    InvalidMetric {
        /// The unrecognised metric name.
        name: String,
    },

    /// Returned when the Minkowski power is non-finite or non-positive.
    #[error("minkowski power must be finite and positive, got {p}")]
    InvalidMinkowskiPower {
        /// The invalid power.
        p: f64,
    },

    /// Returned when the dataset has no cases or no features.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Returned when a case has a different feature count than the first case.
    #[error("case {row} has {got} features, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending case.
        row: usize,
        /// Feature count of the first case.
        expected: usize,
        /// Feature count of the offending case.
        got: usize,
    },

    /// Returned when a flat buffer length is not divisible by the feature count.
    #[error("buffer length {len} is not divisible by n_features {n_features}")]
    ShapeMismatch {
        /// Length of the flat buffer.
        len: usize,
        /// Requested number of features per case.
        n_features: usize,
    },

    /// Returned when a feature value is NaN or infinite.
    #[error("non-finite feature value in case {row}")]
    NonFiniteInput {
        /// Index of the offending case.
        row: usize,
    },

    /// Returned when a metric yields a negative or non-finite distance.
    #[error("invalid distance {value} between cases {i} and {j}")]
    InvalidDistance {
        /// First case index.
        i: usize,
        /// Second case index.
        j: usize,
        /// The offending distance.
        value: f64,
    },

    /// Returned when a precomputed buffer is not `n * n` long.
    #[error("matrix buffer length {len} is not {n} x {n}")]
    NotSquare {
        /// Length of the buffer.
        len: usize,
        /// Requested side length.
        n: usize,
    },

    /// Returned when a precomputed matrix is not symmetric.
    #[error("matrix is not symmetric at ({i}, {j})")]
    Asymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },

    /// Returned when a precomputed matrix has a non-zero diagonal entry.
    #[error("diagonal entry {i} is not zero")]
    NonZeroDiagonal {
        /// Diagonal position.
        i: usize,
    },
}
