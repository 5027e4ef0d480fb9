//! Per-class vote proportions among selected neighbors.

use crate::tally::tally_into;

/// Returns the proportion of `codes` falling in each of `n_categories` categories.
///
/// The denominator is the actual neighbor-set size (`codes.len()`), which can
/// exceed k under [`TiePolicy::Min`](crate::TiePolicy::Min). Categories absent
/// from `codes` get 0.0. Returns all zeros for an empty slice.
pub fn probabilities_one(codes: &[usize], n_categories: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_categories];
    let mut out = vec![0.0; n_categories];
    probabilities_into(codes, &mut counts, &mut out);
    out
}

/// Buffer-reusing form of [`probabilities_one`]. `counts` and `out` must both
/// have the universe size as length.
pub(crate) fn probabilities_into(codes: &[usize], counts: &mut [usize], out: &mut [f64]) {
    debug_assert_eq!(counts.len(), out.len());
    tally_into(codes, counts);
    if codes.is_empty() {
        out.fill(0.0);
        return;
    }
    let total = codes.len() as f64;
    for (p, &c) in out.iter_mut().zip(counts.iter()) {
        *p = c as f64 / total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_proportions() {
        let p = probabilities_one(&[0, 0, 1], 2);
        assert_abs_diff_eq!(p[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unseen_category_is_zero() {
        let p = probabilities_one(&[2, 2], 4);
        assert_eq!(p, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_sums_to_one() {
        let p = probabilities_one(&[0, 1, 2, 2, 1, 0, 0], 3);
        assert_abs_diff_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty() {
        assert_eq!(probabilities_one(&[], 2), vec![0.0, 0.0]);
    }
}
