//! Per-test-case ranking of training distances.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::TiePolicy;

/// Ranks distances ascending (1 = nearest), resolving equal distances by `ties`.
///
/// `distances` holds one test case's distances to every training case, in
/// ascending train-index order; the returned ranks use the same order.
/// Selecting `rank <= k` yields the neighbor set. `rng` is only consumed by
/// [`TiePolicy::Random`].
///
/// # Example
///
/// ```
/// use distknn_knn::{TiePolicy, rank_row};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let d = [1.0, 2.0, 2.0, 3.0];
/// assert_eq!(rank_row(&d, TiePolicy::Min, &mut rng), vec![1, 2, 2, 4]);
/// assert_eq!(rank_row(&d, TiePolicy::Max, &mut rng), vec![1, 3, 3, 4]);
/// assert_eq!(rank_row(&d, TiePolicy::First, &mut rng), vec![1, 2, 3, 4]);
/// ```
pub fn rank_row(distances: &[f64], ties: TiePolicy, rng: &mut impl Rng) -> Vec<usize> {
    let mut order = Vec::with_capacity(distances.len());
    let mut ranks = Vec::with_capacity(distances.len());
    rank_row_into(distances, ties, rng, &mut order, &mut ranks);
    ranks
}

/// Buffer-reusing form of [`rank_row`]. `order` is scratch space; `ranks`
/// receives the result.
pub(crate) fn rank_row_into(
    distances: &[f64],
    ties: TiePolicy,
    rng: &mut impl Rng,
    order: &mut Vec<usize>,
    ranks: &mut Vec<usize>,
) {
    let n = distances.len();

    // Stable sort keeps ascending index order within each tie group
    order.clear();
    order.extend(0..n);
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

    ranks.clear();
    ranks.resize(n, 0);

    let mut start = 0;
    while start < n {
        let d = distances[order[start]];
        let mut end = start + 1;
        while end < n && distances[order[end]] == d {
            end += 1;
        }

        let group = &mut order[start..end];
        match ties {
            TiePolicy::Min => group.iter().for_each(|&i| ranks[i] = start + 1),
            TiePolicy::Max => group.iter().for_each(|&i| ranks[i] = end),
            TiePolicy::First | TiePolicy::Random => {
                if ties == TiePolicy::Random && group.len() > 1 {
                    group.shuffle(rng);
                }
                for (offset, &i) in group.iter().enumerate() {
                    ranks[i] = start + offset + 1;
                }
            }
        }

        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rank(d: &[f64], ties: TiePolicy) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(0);
        rank_row(d, ties, &mut rng)
    }

    #[test]
    fn test_no_ties_all_policies_agree() {
        let d = [10.0, 9.0, 8.0];
        for ties in [
            TiePolicy::Min,
            TiePolicy::Max,
            TiePolicy::First,
            TiePolicy::Random,
        ] {
            assert_eq!(rank(&d, ties), vec![3, 2, 1], "policy {ties}");
        }
    }

    #[test]
    fn test_min() {
        assert_eq!(rank(&[1.0, 2.0, 2.0, 3.0], TiePolicy::Min), vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_max() {
        assert_eq!(rank(&[1.0, 2.0, 2.0, 3.0], TiePolicy::Max), vec![1, 3, 3, 4]);
    }

    #[test]
    fn test_first_uses_index_order() {
        assert_eq!(rank(&[2.0, 1.0, 2.0, 2.0], TiePolicy::First), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_random_is_permutation_of_group_ranks() {
        let d = [5.0, 1.0, 5.0, 5.0, 0.5];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = rank_row(&d, TiePolicy::Random, &mut rng);
            assert_eq!(r[4], 1);
            assert_eq!(r[1], 2);
            let mut tied = vec![r[0], r[2], r[3]];
            tied.sort_unstable();
            assert_eq!(tied, vec![3, 4, 5]);
        }
    }

    #[test]
    fn test_random_varies_with_seed() {
        let d = [1.0; 6];
        let first = rank(&d, TiePolicy::Random);
        let varied = (1..30).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            rank_row(&d, TiePolicy::Random, &mut rng) != first
        });
        assert!(varied);
    }

    #[test]
    fn test_random_reproducible_with_seed() {
        let d = [1.0, 1.0, 1.0, 2.0, 2.0];
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(
            rank_row(&d, TiePolicy::Random, &mut a),
            rank_row(&d, TiePolicy::Random, &mut b)
        );
    }

    #[test]
    fn test_all_equal() {
        let d = [4.0; 4];
        assert_eq!(rank(&d, TiePolicy::Min), vec![1; 4]);
        assert_eq!(rank(&d, TiePolicy::Max), vec![4; 4]);
        assert_eq!(rank(&d, TiePolicy::First), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(rank(&[], TiePolicy::Min).is_empty());
        assert_eq!(rank(&[3.0], TiePolicy::Max), vec![1]);
    }

    #[test]
    fn test_buffers_are_reset() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut order = vec![7, 7, 7, 7, 7];
        let mut ranks = vec![9; 5];
        rank_row_into(&[2.0, 1.0], TiePolicy::Min, &mut rng, &mut order, &mut ranks);
        assert_eq!(ranks, vec![2, 1]);
    }
}
