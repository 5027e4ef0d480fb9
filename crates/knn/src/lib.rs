//! Rank-based k-nearest-neighbor prediction over a precomputed distance matrix.
//!
//! Every test case is ranked against the training cases by distance, with a
//! configurable tie policy deciding how equal distances share ranks. The
//! neighbor set is every training case ranked `<= k`:
//!
//! | Policy | Neighbor-set size | Randomness |
//! |--------|-------------------|------------|
//! | Min (default) | ≥ k | none |
//! | Max | ≤ k (may be empty) | none |
//! | First | = k | none |
//! | Random | = k | caller's RNG |
//!
//! Neighbor responses are reduced with a majority vote (categorical) or a
//! numeric reducer (continuous), or turned into per-category proportions.
//!
//! # Quick start
//!
//! ```
//! use distknn_distance::{Dataset, DistanceMatrix, Metric};
//! use distknn_knn::{PredictConfig, Responses, predict};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let data = Dataset::from_rows(&[[0.0], [1.0], [2.0], [10.0]]).unwrap();
//! let matrix = DistanceMatrix::build(&data, &Metric::Euclidean).unwrap();
//! let responses = Responses::categorical(&["A", "A", "B"]).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = predict(&[0, 1, 2], &[3], &responses, &matrix, &PredictConfig::new(3), &mut rng)
//!     .unwrap();
//! assert_eq!(result.categories().unwrap(), &["A"]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! predict() / predict_probabilities()
//!   ├─ normalize index sets       (index.rs)
//!   ├─ validate k, align responses (config.rs, response.rs)
//!   ├─ per test case, in parallel:
//!   │    ├─ rank_row_into()       (rank.rs)
//!   │    ├─ select ranks <= k
//!   │    └─ majority_vote() / Aggregation::reduce() / probabilities_into()
//!   └─ assemble results           (result.rs)
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod predict;
pub mod probability;
pub mod rank;
pub mod response;
pub mod result;
pub mod tally;

pub(crate) mod index;

pub use aggregate::{
    Aggregation, AggregationRegistry, BUILTIN_AGGREGATIONS, CustomReducer, majority_vote,
};
pub use config::{PredictConfig, TiePolicy};
pub use error::KnnError;
pub use predict::{predict, predict_probabilities};
pub use probability::probabilities_one;
pub use rank::rank_row;
pub use response::{ResponseKind, Responses};
pub use result::{ClassProbabilities, KnnPredictions, PredictionValues};
pub use tally::tally;
