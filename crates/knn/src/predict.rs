//! Prediction and class-probability entry points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use distknn_distance::DistanceMatrix;

use crate::aggregate::majority_vote;
use crate::config::{PredictConfig, TiePolicy};
use crate::error::KnnError;
use crate::index::normalize;
use crate::probability::probabilities_into;
use crate::rank::rank_row_into;
use crate::response::{Aligned, ResponseKind, Responses};
use crate::result::{ClassProbabilities, KnnPredictions, PredictionValues};

/// Per-thread buffers for ranking one test case at a time.
#[derive(Debug, Default)]
struct RowScratch {
    dists: Vec<f64>,
    order: Vec<usize>,
    ranks: Vec<usize>,
    /// Positions into the sorted train set.
    neighbors: Vec<usize>,
    codes: Vec<usize>,
    values: Vec<f64>,
    counts: Vec<usize>,
}

impl RowScratch {
    fn with_capacity(n_train: usize) -> Self {
        Self {
            dists: Vec::with_capacity(n_train),
            order: Vec::with_capacity(n_train),
            ranks: Vec::with_capacity(n_train),
            neighbors: Vec::with_capacity(n_train),
            codes: Vec::with_capacity(n_train),
            values: Vec::with_capacity(n_train),
            counts: Vec::new(),
        }
    }

    /// Fills `neighbors` with the train positions ranked `<= k` for `test_index`.
    fn select(
        &mut self,
        matrix: &DistanceMatrix,
        test_index: usize,
        train: &[usize],
        ties: TiePolicy,
        k: usize,
        rng: &mut impl Rng,
    ) -> Result<(), KnnError> {
        matrix.gather_row(test_index, train, &mut self.dists);
        rank_row_into(&self.dists, ties, rng, &mut self.order, &mut self.ranks);

        self.neighbors.clear();
        self.neighbors.extend(
            self.ranks
                .iter()
                .enumerate()
                .filter(|&(_, &r)| r <= k)
                .map(|(pos, _)| pos),
        );
        if self.neighbors.is_empty() {
            return Err(KnnError::EmptyNeighborSet { test_index });
        }
        Ok(())
    }

    /// Copies the category codes of the selected neighbors into `codes`.
    fn gather_codes(&mut self, codes: &[usize]) {
        self.codes.clear();
        self.codes.extend(self.neighbors.iter().map(|&pos| codes[pos]));
    }

    /// Copies the continuous responses of the selected neighbors into `values`.
    fn gather_values(&mut self, values: &[f64]) {
        self.values.clear();
        self.values.extend(self.neighbors.iter().map(|&pos| values[pos]));
    }
}

/// Validated, sorted inputs shared by both entry points.
struct Prepared {
    train: Vec<usize>,
    test: Vec<usize>,
    responses: Aligned,
    /// One RNG seed per test case, drawn before the parallel section.
    seeds: Vec<u64>,
}

fn prepare(
    train: &[usize],
    test: &[usize],
    responses: &Responses,
    matrix: &DistanceMatrix,
    config: &PredictConfig,
    rng: &mut impl Rng,
) -> Result<Prepared, KnnError> {
    let n = matrix.n();
    let train = normalize(train, n, "train")?;
    let test = normalize(test, n, "test")?;
    config.validate(train.len())?;
    let responses = responses.align(&train, n)?;
    let seeds = test.iter().map(|_| rng.random::<u64>()).collect();
    Ok(Prepared {
        train,
        test,
        responses,
        seeds,
    })
}

/// Selects the neighbors of every test case in parallel and applies `reduce`
/// to each selection.
///
/// Returns the neighbor-set sizes and the reduced rows, both in sorted test
/// order. Each row gets its own RNG seeded from `prepared.seeds`.
fn reduce_rows<T, F>(
    prepared: &Prepared,
    matrix: &DistanceMatrix,
    config: &PredictConfig,
    reduce: F,
) -> Result<(Vec<usize>, Vec<T>), KnnError>
where
    T: Send,
    F: Fn(&mut RowScratch, usize, &mut StdRng) -> Result<T, KnnError> + Sync,
{
    let k = config.k();
    let ties = config.ties();
    let train = &prepared.train;

    let rows: Vec<(usize, T)> = prepared
        .test
        .par_iter()
        .zip(prepared.seeds.par_iter())
        .map_init(
            || RowScratch::with_capacity(train.len()),
            |scratch, (&test_index, &seed)| -> Result<(usize, T), KnnError> {
                let mut row_rng = StdRng::seed_from_u64(seed);
                scratch.select(matrix, test_index, train, ties, k, &mut row_rng)?;
                let row = reduce(scratch, test_index, &mut row_rng)?;
                Ok((scratch.neighbors.len(), row))
            },
        )
        .collect::<Result<_, KnnError>>()?;

    Ok(rows.into_iter().unzip())
}

/// Predicts a response for every test case from its k nearest training cases.
///
/// Index sets are sorted ascending first; output row `i` belongs to the
/// `i`-th smallest test index. Each test case is ranked against the training
/// cases with the configured [`TiePolicy`], and the responses of the cases
/// ranked `<= k` are reduced with the configured aggregation (majority for
/// categorical responses, mean for continuous ones by default).
///
/// `responses` is either full-length (indexed by dataset row) or
/// train-length (aligned with the sorted train indices). Randomness for
/// [`TiePolicy::Random`] and majority tie-breaks comes from `rng` only, so a
/// seeded generator makes every call reproducible.
///
/// # Errors
///
/// Returns [`KnnError::IncompatibleAggregation`] if the aggregation does not
/// fit the response kind, [`KnnError::EmptyIndexSet`],
/// [`KnnError::IndexOutOfRange`] or [`KnnError::DuplicateIndex`] for bad
/// index sets, [`KnnError::InvalidK`] unless `1 <= k <= |train|`,
/// [`KnnError::ResponseLengthMismatch`] for misaligned responses, and
/// [`KnnError::EmptyNeighborSet`] if a test case ends up with no neighbors
/// (possible under [`TiePolicy::Max`]). No partial result is returned.
#[tracing::instrument(
    skip_all,
    fields(n_train = train.len(), n_test = test.len(), k = config.k(), ties = %config.ties())
)]
pub fn predict(
    train: &[usize],
    test: &[usize],
    responses: &Responses,
    matrix: &DistanceMatrix,
    config: &PredictConfig,
    rng: &mut impl Rng,
) -> Result<KnnPredictions, KnnError> {
    let aggregation = config.resolve_aggregation(responses.kind())?;
    let prepared = prepare(train, test, responses, matrix, config, rng)?;

    let (neighbor_counts, values) = match &prepared.responses {
        Aligned::Codes(codes) => {
            let levels = responses.levels().unwrap_or_default();
            let (counts, winners) =
                reduce_rows(&prepared, matrix, config, |scratch, test_index, row_rng| {
                    scratch.gather_codes(codes);
                    majority_vote(&scratch.codes, levels.len(), row_rng)
                        .ok_or(KnnError::EmptyNeighborSet { test_index })
                })?;
            let labels = winners.into_iter().map(|c| levels[c].clone()).collect();
            (counts, PredictionValues::Categories(labels))
        }
        Aligned::Values(values) => {
            let (counts, reduced) = reduce_rows(&prepared, matrix, config, |scratch, _, _| {
                scratch.gather_values(values);
                aggregation.reduce(&scratch.values).ok_or_else(|| {
                    KnnError::IncompatibleAggregation {
                        method: aggregation.name().to_string(),
                        kind: ResponseKind::Continuous,
                    }
                })
            })?;
            (counts, PredictionValues::Values(reduced))
        }
    };

    debug!(aggregation = aggregation.name(), "predictions complete");
    Ok(KnnPredictions::new(prepared.test, neighbor_counts, values))
}

/// Computes, for every test case, the share of each category among its k
/// nearest training cases.
///
/// Shares are taken over the actual neighbor set, which under
/// [`TiePolicy::Min`] may hold more than k cases. Every row covers the whole
/// category universe (unseen categories get 0.0) and sums to 1. The
/// aggregation setting of `config` is not used.
///
/// # Errors
///
/// Returns [`KnnError::NotCategorical`] for continuous responses, before any
/// other check, and otherwise the same errors as [`predict`].
#[tracing::instrument(
    skip_all,
    fields(n_train = train.len(), n_test = test.len(), k = config.k(), ties = %config.ties())
)]
pub fn predict_probabilities(
    train: &[usize],
    test: &[usize],
    responses: &Responses,
    matrix: &DistanceMatrix,
    config: &PredictConfig,
    rng: &mut impl Rng,
) -> Result<ClassProbabilities, KnnError> {
    let levels = responses.levels().ok_or(KnnError::NotCategorical)?;
    let prepared = prepare(train, test, responses, matrix, config, rng)?;
    let Aligned::Codes(codes) = &prepared.responses else {
        return Err(KnnError::NotCategorical);
    };
    let n_categories = levels.len();

    let (neighbor_counts, rows) = reduce_rows(&prepared, matrix, config, |scratch, _, _| {
        scratch.gather_codes(codes);
        scratch.counts.resize(n_categories, 0);
        let mut probs = vec![0.0; n_categories];
        probabilities_into(&scratch.codes, &mut scratch.counts, &mut probs);
        Ok(probs)
    })?;
    let probs: Vec<f64> = rows.into_iter().flatten().collect();

    debug!(n_categories, "class probabilities complete");
    Ok(ClassProbabilities::new(
        levels.to_vec(),
        prepared.test,
        neighbor_counts,
        probs,
    ))
}
