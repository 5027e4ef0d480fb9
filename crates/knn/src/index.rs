//! Train/test index set normalisation.

use crate::error::KnnError;

/// Validates an index set against `n` cases and returns it sorted ascending.
///
/// Output rows and response alignment follow this order, not the caller's.
pub(crate) fn normalize(
    indices: &[usize],
    n: usize,
    set: &'static str,
) -> Result<Vec<usize>, KnnError> {
    if indices.is_empty() {
        return Err(KnnError::EmptyIndexSet { set });
    }
    if let Some(&index) = indices.iter().find(|&&i| i >= n) {
        return Err(KnnError::IndexOutOfRange { set, index, n });
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(KnnError::DuplicateIndex {
            set,
            index: pair[0],
        });
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts() {
        assert_eq!(normalize(&[5, 0, 3], 6, "train").unwrap(), vec![0, 3, 5]);
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            normalize(&[], 6, "test"),
            Err(KnnError::EmptyIndexSet { set: "test" })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            normalize(&[1, 6], 6, "train"),
            Err(KnnError::IndexOutOfRange {
                set: "train",
                index: 6,
                n: 6
            })
        ));
    }

    #[test]
    fn test_duplicate() {
        assert!(matches!(
            normalize(&[4, 1, 4], 6, "train"),
            Err(KnnError::DuplicateIndex {
                set: "train",
                index: 4
            })
        ));
    }
}
