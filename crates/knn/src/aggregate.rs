//! Reduction of neighbor responses into a single prediction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

use distknn_stats as stats;

use crate::error::KnnError;
use crate::response::ResponseKind;
use crate::tally::tally;

/// Names of the built-in aggregation methods.
pub const BUILTIN_AGGREGATIONS: &[&str] = &["majority", "mean", "median", "min", "max", "sum"];

type ReduceFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A caller-supplied reduction over continuous neighbor responses.
#[derive(Clone)]
pub struct CustomReducer {
    name: String,
    reduce: Arc<ReduceFn>,
}

impl CustomReducer {
    /// Wraps a reduction function under a name.
    pub fn new<F>(name: impl Into<String>, reduce: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            reduce: Arc::new(reduce),
        }
    }

    /// Returns the reducer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the reducer.
    pub fn apply(&self, values: &[f64]) -> f64 {
        (self.reduce)(values)
    }
}

impl fmt::Debug for CustomReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomReducer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomReducer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.reduce, &other.reduce)
    }
}

/// How the responses of a test case's neighbors become one prediction.
///
/// `Majority` applies to categorical responses; every other method applies to
/// continuous responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Most frequent category; ties between top categories are broken uniformly at random.
    Majority,
    /// Arithmetic mean.
    Mean,
    /// Middle value; the average of the two middle values for even counts.
    Median,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Sum of values.
    Sum,
    /// Caller-supplied reducer.
    Custom(CustomReducer),
}

impl Aggregation {
    /// Returns the default method for a response kind.
    pub fn default_for(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Categorical => Aggregation::Majority,
            ResponseKind::Continuous => Aggregation::Mean,
        }
    }

    /// Returns the method's name.
    pub fn name(&self) -> &str {
        match self {
            Aggregation::Majority => "majority",
            Aggregation::Mean => "mean",
            Aggregation::Median => "median",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Sum => "sum",
            Aggregation::Custom(r) => r.name(),
        }
    }

    /// Returns `true` if the method applies to responses of `kind`.
    pub fn supports(&self, kind: ResponseKind) -> bool {
        match self {
            Aggregation::Majority => kind == ResponseKind::Categorical,
            _ => kind == ResponseKind::Continuous,
        }
    }

    /// Reduces continuous neighbor responses.
    ///
    /// Returns `None` for an empty slice or for [`Aggregation::Majority`],
    /// which works on category codes through [`majority_vote`].
    pub fn reduce(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Aggregation::Majority => None,
            Aggregation::Mean => Some(stats::mean(values)),
            Aggregation::Median => Some(stats::median_unsorted(values)),
            Aggregation::Min => Some(stats::min(values)),
            Aggregation::Max => Some(stats::max(values)),
            Aggregation::Sum => Some(stats::sum(values)),
            Aggregation::Custom(r) => Some(r.apply(values)),
        }
    }
}

impl FromStr for Aggregation {
    type Err = KnnError;

    /// Parses a built-in method name. Custom reducers resolve through an
    /// [`AggregationRegistry`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "majority" => Ok(Aggregation::Majority),
            "mean" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "sum" => Ok(Aggregation::Sum),
            _ => Err(KnnError::UnknownAggregationMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Name lookup for aggregation methods: the built-ins plus registered reducers.
///
/// # Example
///
/// ```
/// use distknn_knn::{Aggregation, AggregationRegistry};
///
/// let mut registry = AggregationRegistry::new();
/// registry.register("range", |v: &[f64]| {
///     v.iter().cloned().fold(f64::MIN, f64::max) - v.iter().cloned().fold(f64::MAX, f64::min)
/// }).unwrap();
///
/// assert_eq!(registry.resolve("median").unwrap(), Aggregation::Median);
/// assert_eq!(registry.resolve("range").unwrap().reduce(&[1.0, 4.0]), Some(3.0));
/// assert!(registry.resolve("mode").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregationRegistry {
    custom: BTreeMap<String, CustomReducer>,
}

impl AggregationRegistry {
    /// Creates a registry holding only the built-in methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom reducer under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::DuplicateAggregation`] if `name` is a built-in
    /// method (case-insensitively) or already registered.
    pub fn register<F>(&mut self, name: &str, reduce: F) -> Result<(), KnnError>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        let builtin = BUILTIN_AGGREGATIONS.contains(&name.to_lowercase().as_str());
        if builtin || self.custom.contains_key(name) {
            return Err(KnnError::DuplicateAggregation {
                name: name.to_string(),
            });
        }
        self.custom
            .insert(name.to_string(), CustomReducer::new(name, reduce));
        Ok(())
    }

    /// Resolves a method name. Built-in names match case-insensitively,
    /// registered names exactly.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::UnknownAggregationMethod`] if nothing matches.
    pub fn resolve(&self, name: &str) -> Result<Aggregation, KnnError> {
        if let Some(reducer) = self.custom.get(name) {
            return Ok(Aggregation::Custom(reducer.clone()));
        }
        name.parse()
    }

    /// Returns all resolvable names, built-ins first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        BUILTIN_AGGREGATIONS
            .iter()
            .copied()
            .chain(self.custom.keys().map(String::as_str))
    }
}

/// Returns the most frequent category code among `codes`.
///
/// Counts cover all `n_categories` categories. When several categories share
/// the top count, one of them is chosen uniformly at random. Returns `None`
/// if `codes` is empty.
pub fn majority_vote(codes: &[usize], n_categories: usize, rng: &mut impl Rng) -> Option<usize> {
    if codes.is_empty() {
        return None;
    }
    let counts = tally(codes, n_categories);
    let top = counts.iter().copied().max()?;
    let leaders: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == top)
        .map(|(category, _)| category)
        .collect();

    match leaders.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => Some(leaders[rng.random_range(0..leaders.len())]),
    }
}
