//! Class-probability integration tests.

use approx::assert_abs_diff_eq;
use distknn_distance::{Dataset, DistanceMatrix, Metric};
use distknn_knn::{
    Aggregation, KnnError, PredictConfig, Responses, TiePolicy, predict, predict_probabilities,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn line() -> DistanceMatrix {
    let data = Dataset::from_rows(&[[0.0], [1.0], [2.0], [10.0]]).unwrap();
    DistanceMatrix::build(&data, &Metric::Euclidean).unwrap()
}

#[test]
fn k2_splits_evenly() {
    let y = Responses::categorical(&["A", "A", "B"]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let probs =
        predict_probabilities(&[0, 1, 2], &[3], &y, &line(), &PredictConfig::new(2), &mut rng)
            .unwrap();
    assert_eq!(probs.get(0, "A"), Some(0.5));
    assert_eq!(probs.get(0, "B"), Some(0.5));
    assert_eq!(probs.neighbor_counts(), &[2]);
}

#[test]
fn rows_sum_to_one() {
    let points: Vec<[f64; 2]> = (0..25).map(|i| [(i % 5) as f64, (i / 5) as f64]).collect();
    let m = DistanceMatrix::build(&Dataset::from_rows(&points).unwrap(), &Metric::Maximum).unwrap();
    let labels: Vec<&str> = (0..25).map(|i| ["r", "g", "b"][i % 3]).collect();
    let y = Responses::categorical(&labels).unwrap();
    let train: Vec<usize> = (0..25).step_by(2).collect();
    let test: Vec<usize> = (1..25).step_by(2).collect();

    for ties in [TiePolicy::Min, TiePolicy::First, TiePolicy::Random] {
        let cfg = PredictConfig::new(4).with_ties(ties);
        let mut rng = StdRng::seed_from_u64(3);
        let probs = predict_probabilities(&train, &test, &y, &m, &cfg, &mut rng).unwrap();
        assert_eq!(probs.n_rows(), test.len());
        for row in probs.rows() {
            assert_eq!(row.len(), 3);
            assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }
}

#[test]
fn min_ties_use_actual_neighbor_count() {
    // Distances from case 4 to train: 1, 1, 1, 3
    let data = Dataset::from_rows(&[[1.0], [3.0], [1.0], [5.0], [2.0]]).unwrap();
    let m = DistanceMatrix::build(&data, &Metric::Euclidean).unwrap();
    let y = Responses::categorical(&["x", "y", "y", "z"]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let probs =
        predict_probabilities(&[0, 1, 2, 3], &[4], &y, &m, &PredictConfig::new(2), &mut rng)
            .unwrap();
    assert_eq!(probs.neighbor_counts(), &[3]);
    assert_abs_diff_eq!(probs.get(0, "x").unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(probs.get(0, "y").unwrap(), 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(probs.get(0, "z"), Some(0.0));
}

#[test]
fn explicit_levels_add_zero_columns() {
    let y = Responses::categorical_with_levels(&["A", "A", "B"], &["C", "B", "A"]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let probs =
        predict_probabilities(&[0, 1, 2], &[3], &y, &line(), &PredictConfig::new(3), &mut rng)
            .unwrap();
    assert_eq!(probs.categories(), &["C", "B", "A"]);
    assert_eq!(probs.row(0)[0], 0.0);
    assert_abs_diff_eq!(probs.row(0)[1], 1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(probs.row(0)[2], 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn aggregation_setting_is_ignored() {
    let y = Responses::categorical(&["A", "A", "B"]).unwrap();
    let cfg = PredictConfig::new(3).with_aggregation(Aggregation::Median);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(predict_probabilities(&[0, 1, 2], &[3], &y, &line(), &cfg, &mut rng).is_ok());
}

#[test]
fn continuous_responses_rejected_first() {
    let y = Responses::continuous(vec![1.0, 2.0, 3.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    // k is also invalid here; the response kind is checked first
    let result =
        predict_probabilities(&[0, 1, 2], &[3], &y, &line(), &PredictConfig::new(0), &mut rng);
    assert!(matches!(result, Err(KnnError::NotCategorical)));
}

#[test]
fn argmax_agrees_with_unambiguous_vote() {
    let y = Responses::categorical(&["A", "A", "B"]).unwrap();
    let cfg = PredictConfig::new(3);
    let probs =
        predict_probabilities(&[0, 1, 2], &[3], &y, &line(), &cfg, &mut StdRng::seed_from_u64(0))
            .unwrap();
    let pred = predict(&[0, 1, 2], &[3], &y, &line(), &cfg, &mut StdRng::seed_from_u64(0)).unwrap();
    let row = probs.row(0);
    let best = (0..row.len())
        .max_by(|&a, &b| row[a].total_cmp(&row[b]))
        .unwrap();
    assert_eq!(probs.categories()[best], pred.categories().unwrap()[0]);
}
