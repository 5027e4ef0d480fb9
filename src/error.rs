//! Error type for the distknn facade.

use std::path::PathBuf;

use distknn_distance::DistanceError;
use distknn_knn::KnnError;

/// Error returned when loading or converting settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a settings file cannot be read.
    #[error("failed to read settings file {}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the TOML document is malformed or has unknown keys.
    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),

    /// Returned when the distance section names an invalid metric.
    #[error(transparent)]
    Distance(#[from] DistanceError),

    /// Returned when the predict section is invalid.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// Returned when a value is out of range.
    #[error("invalid setting {field}: {message}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
