//! Numeric helpers shared by the distknn crates.
//!
//! The reducers here back the continuous aggregation methods (`mean`,
//! `median`, `min`, `max`, `sum`); [`round_significant`] is the rounding
//! applied to every stored distance.

use std::cmp::Ordering;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sum of a slice. Returns 0.0 if empty.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Smallest value of a slice. Returns `f64::INFINITY` if empty.
pub fn min(data: &[f64]) -> f64 {
    data.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value of a slice. Returns `f64::NEG_INFINITY` if empty.
pub fn max(data: &[f64]) -> f64 {
    data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Returns an ascending sorted copy of `data`. NaN compares as equal.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Median of unsorted data. Sorts a copy first.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn median_unsorted(data: &[f64]) -> f64 {
    median(&sorted(data))
}

/// Rounds `x` to `digits` places after the decimal point (half away from zero).
///
/// Negative `digits` round to tens, hundreds and so on. Values whose scaled
/// form overflows are returned unchanged, as are non-finite inputs. `-0.0` is
/// normalised to `0.0`.
pub fn round_decimal(x: f64, digits: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let rounded = if digits >= 0 {
        let scale = 10f64.powi(digits);
        let scaled = x * scale;
        if !scaled.is_finite() {
            return x;
        }
        scaled.round() / scale
    } else {
        let scale = 10f64.powi(-digits);
        if !scale.is_finite() {
            return 0.0;
        }
        (x / scale).round() * scale
    };
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Rounds `x` to `digits` significant decimal digits (half away from zero).
///
/// Same edge handling as [`round_decimal`]: non-finite inputs and values whose
/// scaled form overflows come back unchanged, and zero is returned as `0.0`.
pub fn round_significant(x: f64, digits: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if x == 0.0 {
        return 0.0;
    }
    let magnitude = x.abs().log10().floor() as i32;
    round_decimal(x, digits - 1 - magnitude)
}
