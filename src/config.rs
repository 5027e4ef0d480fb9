//! TOML settings for distance computation and prediction.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level settings document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Global RNG seed. Unset means seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Distance matrix settings.
    #[serde(default)]
    pub distance: DistanceToml,

    /// Prediction settings.
    #[serde(default)]
    pub predict: PredictToml,
}

impl Settings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Returns an RNG seeded from `seed`, or from the OS if unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Reads and parses a settings file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml_str(&text)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistanceToml {
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default = "default_p")]
    pub p: f64,
}

impl Default for DistanceToml {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            p: default_p(),
        }
    }
}

fn default_metric() -> String {
    "euclidean".to_string()
}
fn default_p() -> f64 {
    distknn_distance::DEFAULT_MINKOWSKI_P
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_ties")]
    pub ties: String,
    #[serde(default)]
    pub aggregation: Option<String>,
}

impl Default for PredictToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            ties: default_ties(),
            aggregation: None,
        }
    }
}

fn default_k() -> usize {
    1
}
fn default_ties() -> String {
    "min".to_string()
}
