//! Elementwise distance metrics.

use std::fmt;
use std::str::FromStr;

use crate::error::DistanceError;

/// Default Minkowski power.
pub const DEFAULT_MINKOWSKI_P: f64 = 2.0;

/// A symmetric distance between two feature vectors of equal length.
///
/// Implemented by [`Metric`] and by any `Fn(&[f64], &[f64]) -> f64 + Sync`
/// closure, so callers can plug in their own distance. Implementations must
/// return a finite, non-negative value; [`DistanceMatrix`] rejects anything
/// else.
///
/// [`DistanceMatrix`]: crate::DistanceMatrix
pub trait PairwiseMetric: Sync {
    /// Computes the distance between `a` and `b`.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> PairwiseMetric for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Built-in distance metrics.
///
/// | Name | Formula |
/// |------|---------|
/// | `euclidean` | `sqrt(Σ (aᵢ − bᵢ)²)` |
/// | `manhattan` | `Σ |aᵢ − bᵢ|` |
/// | `maximum` | `max |aᵢ − bᵢ|` |
/// | `minkowski` | `(Σ |aᵢ − bᵢ|ᵖ)^(1/p)` |
/// | `canberra` | `Σ |aᵢ − bᵢ| / (|aᵢ| + |bᵢ|)`, `0/0` terms missing, rescaled by `n / n_used` |
/// | `binary` | share of "on" positions where exactly one side is non-zero |
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Metric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
    /// Largest absolute difference (Chebyshev).
    Maximum,
    /// Generalised p-norm of the difference.
    Minkowski {
        /// Power, finite and positive.
        p: f64,
    },
    /// Weighted absolute difference.
    Canberra,
    /// Asymmetric binary (Jaccard) distance on non-zero indicators.
    Binary,
}

impl Metric {
    /// Resolves a metric by name. `p` is used only by `minkowski`.
    ///
    /// Names are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::InvalidMetric`] for unknown names and
    /// [`DistanceError::InvalidMinkowskiPower`] for a non-finite or
    /// non-positive `p`.
    pub fn from_name(name: &str, p: f64) -> Result<Self, DistanceError> {
        let metric = match name.to_lowercase().as_str() {
            "euclidean" => Metric::Euclidean,
            "manhattan" => Metric::Manhattan,
            "maximum" => Metric::Maximum,
            "minkowski" => Metric::Minkowski { p },
            "canberra" => Metric::Canberra,
            "binary" => Metric::Binary,
            _ => {
                return Err(DistanceError::InvalidMetric {
                    name: name.to_string(),
                });
            }
        };
        metric.validate()?;
        Ok(metric)
    }

    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Maximum => "maximum",
            Metric::Minkowski { .. } => "minkowski",
            Metric::Canberra => "canberra",
            Metric::Binary => "binary",
        }
    }

    /// Validates metric parameters.
    pub fn validate(&self) -> Result<(), DistanceError> {
        match *self {
            Metric::Minkowski { p } if !p.is_finite() || p <= 0.0 => {
                Err(DistanceError::InvalidMinkowskiPower { p })
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for Metric {
    type Err = DistanceError;

    /// Parses a metric name, using [`DEFAULT_MINKOWSKI_P`] for `minkowski`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::from_name(s, DEFAULT_MINKOWSKI_P)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Minkowski { p } => write!(f, "minkowski(p={p})"),
            other => f.write_str(other.name()),
        }
    }
}

impl PairwiseMetric for Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match *self {
            Metric::Euclidean => euclidean(a, b),
            Metric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Metric::Maximum => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            Metric::Minkowski { p } => minkowski(a, b, p),
            Metric::Canberra => canberra(a, b),
            Metric::Binary => binary(a, b),
        }
    }
}

#[inline]
fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[inline]
fn minkowski(a: &[f64], b: &[f64], p: f64) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum::<f64>()
        .powf(1.0 / p)
}

#[inline]
fn canberra(a: &[f64], b: &[f64]) -> f64 {
    let mut acc = 0.0;
    let mut used = 0usize;
    for (x, y) in a.iter().zip(b) {
        let denom = x.abs() + y.abs();
        if denom > 0.0 {
            acc += (x - y).abs() / denom;
            used += 1;
        }
    }
    // 0/0 terms count as missing; the sum is scaled back up to all positions
    if used == 0 {
        0.0
    } else {
        acc * a.len() as f64 / used as f64
    }
}

#[inline]
fn binary(a: &[f64], b: &[f64]) -> f64 {
    let mut either = 0usize;
    let mut exactly_one = 0usize;
    for (x, y) in a.iter().zip(b) {
        let on_a = *x != 0.0;
        let on_b = *y != 0.0;
        if on_a || on_b {
            either += 1;
            if on_a != on_b {
                exactly_one += 1;
            }
        }
    }
    if either == 0 {
        0.0
    } else {
        exactly_one as f64 / either as f64
    }
}
