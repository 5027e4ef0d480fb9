//! Category counting over a fixed universe.

/// Counts occurrences of each category code among `codes`.
///
/// The result has one entry per category in the universe (`n_categories`),
/// in universe order; categories absent from `codes` count zero.
///
/// # Panics
///
/// Panics if a code is `>= n_categories`.
pub fn tally(codes: &[usize], n_categories: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_categories];
    tally_into(codes, &mut counts);
    counts
}

/// Like [`tally`], but writes into a caller-provided buffer whose length is
/// the universe size. The buffer is zeroed first.
pub(crate) fn tally_into(codes: &[usize], counts: &mut [usize]) {
    counts.fill(0);
    for &code in codes {
        counts[code] += 1;
    }
}
