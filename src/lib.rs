//! K-nearest-neighbor prediction over a reusable pairwise distance matrix.
//!
//! The distance matrix is computed once for a dataset and then shared by any
//! number of prediction calls over different train/test splits, neighbor
//! counts and tie policies.
//!
//! | Crate | Provides |
//! |-------|----------|
//! | [`distance`] | [`Dataset`], [`Metric`], [`DistanceMatrix`] |
//! | [`knn`] | [`predict`], [`predict_probabilities`], [`PredictConfig`], [`Responses`] |
//! | [`stats`] | Numeric reducers used by the aggregations |
//!
//! This crate adds TOML [`Settings`], their conversion into the crate
//! configs, and a [`logging`] bootstrap.
//!
//! # Quick start
//!
//! ```
//! use distknn::{AggregationRegistry, Dataset, Responses, Settings, build_distance_matrix};
//! use distknn::convert::{build_metric, build_predict_config};
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     seed = 1
//!     [predict]
//!     k = 3
//!     aggregation = "mean"
//!     "#,
//! )
//! .unwrap();
//!
//! let data = Dataset::from_rows(&[[0.0], [1.0], [2.0], [10.0]]).unwrap();
//! let metric = build_metric(&settings.distance).unwrap();
//! let matrix = distknn::DistanceMatrix::build(&data, &metric).unwrap();
//! let config = build_predict_config(&settings.predict, &AggregationRegistry::new()).unwrap();
//! let responses = Responses::continuous(vec![1.0, 2.0, 3.0]).unwrap();
//!
//! let result =
//!     distknn::predict(&[0, 1, 2], &[3], &responses, &matrix, &config, &mut settings.rng())
//!         .unwrap();
//! assert_eq!(result.continuous().unwrap(), &[2.0]);
//!
//! let same = build_distance_matrix(&data, "euclidean", 2.0).unwrap();
//! assert_eq!(same, matrix);
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod logging;

pub use distknn_distance as distance;
pub use distknn_knn as knn;
pub use distknn_stats as stats;

pub use config::{Settings, load_settings};
pub use distknn_distance::{
    Dataset, DistanceError, DistanceMatrix, Metric, PairwiseMetric, build_distance_matrix,
};
pub use distknn_knn::{
    Aggregation, AggregationRegistry, ClassProbabilities, KnnError, KnnPredictions,
    PredictConfig, PredictionValues, ResponseKind, Responses, TiePolicy, predict,
    predict_probabilities,
};
pub use error::ConfigError;
