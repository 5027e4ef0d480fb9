//! Configuration for KNN prediction calls.

use std::fmt;
use std::str::FromStr;

use crate::aggregate::Aggregation;
use crate::error::KnnError;
use crate::response::ResponseKind;

/// Rule for ranking training cases at equal distance.
///
/// | Policy | `[1, 2, 2, 3]` ranks | Neighbor-set size for k |
/// |--------|----------------------|-------------------------|
/// | Min | `[1, 2, 2, 4]` | ≥ k |
/// | Max | `[1, 3, 3, 4]` | ≤ k |
/// | First | `[1, 2, 3, 4]` | = k |
/// | Random | a random order of the tied ranks | = k |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TiePolicy {
    /// Tied cases share the lowest rank of their group; a tie at the k-th
    /// boundary admits the whole group.
    #[default]
    Min,
    /// Tied cases share the highest rank of their group; a tie straddling the
    /// k-th boundary excludes the whole group.
    Max,
    /// Ties are broken uniformly at random.
    Random,
    /// Ties are broken by ascending train index.
    First,
}

impl TiePolicy {
    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            TiePolicy::Min => "min",
            TiePolicy::Max => "max",
            TiePolicy::Random => "random",
            TiePolicy::First => "first",
        }
    }
}

impl FromStr for TiePolicy {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" => Ok(TiePolicy::Min),
            "max" => Ok(TiePolicy::Max),
            "random" => Ok(TiePolicy::Random),
            "first" => Ok(TiePolicy::First),
            _ => Err(KnnError::InvalidTiePolicy {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a prediction or class-probability call.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use distknn_knn::{Aggregation, PredictConfig, TiePolicy};
///
/// let config = PredictConfig::new(5)
///     .with_ties(TiePolicy::First)
///     .with_aggregation(Aggregation::Median);
///
/// assert!(config.validate(10).is_ok());
/// assert!(config.validate(4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PredictConfig {
    /// Number of nearest neighbors.
    k: usize,
    /// Tie-break rule for equal distances.
    ties: TiePolicy,
    /// Reduction over neighbor responses. `None` resolves from the response kind.
    aggregation: Option<Aggregation>,
}

impl PredictConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `ties = Min`, aggregation chosen from the response kind
    /// (majority for categorical, mean for continuous).
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ties: TiePolicy::Min,
            aggregation: None,
        }
    }

    /// Sets the number of nearest neighbors.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the tie policy.
    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    /// Sets an explicit aggregation method.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the tie policy.
    pub fn ties(&self) -> TiePolicy {
        self.ties
    }

    /// Returns the explicit aggregation method, if any.
    pub fn aggregation(&self) -> Option<&Aggregation> {
        self.aggregation.as_ref()
    }

    /// Validates k against the number of training cases.
    ///
    /// Returns [`KnnError::InvalidK`] unless `1 <= k <= n_train`.
    pub fn validate(&self, n_train: usize) -> Result<(), KnnError> {
        if self.k < 1 || self.k > n_train {
            return Err(KnnError::InvalidK { k: self.k, n_train });
        }
        Ok(())
    }

    /// Returns the aggregation to apply to responses of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::IncompatibleAggregation`] if the explicit method
    /// does not apply to `kind`.
    pub fn resolve_aggregation(&self, kind: ResponseKind) -> Result<Aggregation, KnnError> {
        match &self.aggregation {
            None => Ok(Aggregation::default_for(kind)),
            Some(agg) if agg.supports(kind) => Ok(agg.clone()),
            Some(agg) => Err(KnnError::IncompatibleAggregation {
                method: agg.name().to_string(),
                kind,
            }),
        }
    }
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
