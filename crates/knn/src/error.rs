//! Error types for the distknn-knn crate.

use crate::response::ResponseKind;

/// Error type for all fallible operations in the distknn-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when k is zero or exceeds the number of training cases.
    #[error("k must be in 1..={n_train}, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of training cases.
        n_train: usize,
    },

    /// Returned when a tie policy name is not recognised.
    #[error("unknown tie policy: {name:?}")]
    InvalidTiePolicy {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when an aggregation method name is not recognised.
    #[error("unknown aggregation method: {name:?}")]
    UnknownAggregationMethod {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when registering a reducer under a name that is already taken.
    #[error("aggregation method {name:?} is already defined")]
    DuplicateAggregation {
        /// The conflicting name.
        name: String,
    },

    /// Returned when an aggregation method does not apply to the response kind.
    #[error("aggregation method {method:?} cannot be applied to {kind} responses")]
    IncompatibleAggregation {
        /// Name of the aggregation method.
        method: String,
        /// Kind of the response vector.
        kind: ResponseKind,
    },

    /// Returned when class probabilities are requested for continuous responses.
    #[error("class probabilities require categorical responses")]
    NotCategorical,

    /// Returned when no training case falls within rank k for a test case.
    #[error("no neighbors selected for test case {test_index}")]
    EmptyNeighborSet {
        /// Dataset index of the test case.
        test_index: usize,
    },

    /// Returned when a train or test index set is empty.
    #[error("{set} index set is empty")]
    EmptyIndexSet {
        /// Which set ("train" or "test").
        set: &'static str,
    },

    /// Returned when an index is outside the distance matrix.
    #[error("{set} index {index} is out of range for {n} cases")]
    IndexOutOfRange {
        /// Which set ("train" or "test").
        set: &'static str,
        /// The offending index.
        index: usize,
        /// Number of cases in the distance matrix.
        n: usize,
    },

    /// Returned when an index appears more than once in a set.
    #[error("{set} index {index} appears more than once")]
    DuplicateIndex {
        /// Which set ("train" or "test").
        set: &'static str,
        /// The repeated index.
        index: usize,
    },

    /// Returned when the response vector matches neither the dataset nor the train set size.
    #[error("response length {len} matches neither the dataset ({n_cases}) nor the train set ({n_train})")]
    ResponseLengthMismatch {
        /// Length of the response vector.
        len: usize,
        /// Number of cases in the distance matrix.
        n_cases: usize,
        /// Number of training cases.
        n_train: usize,
    },

    /// Returned when a response vector has no values.
    #[error("response vector is empty")]
    EmptyResponses,

    /// Returned when a continuous response is NaN or infinite.
    #[error("non-finite response at position {index}")]
    NonFiniteResponse {
        /// Position in the response vector.
        index: usize,
    },

    /// Returned when a label is not part of the declared category universe.
    #[error("label {label:?} is not in the category universe")]
    UnknownCategory {
        /// The offending label.
        label: String,
    },

    /// Returned when a declared category universe lists a label twice.
    #[error("category {label:?} is declared more than once")]
    DuplicateCategory {
        /// The repeated label.
        label: String,
    },
}
