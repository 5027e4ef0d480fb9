//! Pure conversion functions: TOML settings structs -> crate API config types.

use distknn_distance::Metric;
use distknn_knn::{AggregationRegistry, PredictConfig, TiePolicy};

use crate::config::{DistanceToml, PredictToml};
use crate::error::ConfigError;

/// Builds a [`Metric`] from the distance section.
pub fn build_metric(distance: &DistanceToml) -> Result<Metric, ConfigError> {
    Ok(Metric::from_name(&distance.metric, distance.p)?)
}

/// Builds a [`PredictConfig`] from the predict section.
///
/// Aggregation names resolve against `registry`, so reducers registered by
/// the caller can be named in the settings file. k is only checked for being
/// positive here; its upper bound depends on the training set.
pub fn build_predict_config(
    predict: &PredictToml,
    registry: &AggregationRegistry,
) -> Result<PredictConfig, ConfigError> {
    if predict.k == 0 {
        return Err(ConfigError::Invalid {
            field: "predict.k",
            message: "must be at least 1".to_string(),
        });
    }
    let ties: TiePolicy = predict.ties.parse()?;
    let mut cfg = PredictConfig::new(predict.k).with_ties(ties);
    if let Some(ref name) = predict.aggregation {
        cfg = cfg.with_aggregation(registry.resolve(name)?);
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distknn_distance::DistanceError;
    use distknn_knn::{Aggregation, KnnError};

    fn distance(metric: &str, p: f64) -> DistanceToml {
        DistanceToml {
            metric: metric.to_string(),
            p,
        }
    }

    fn predict(k: usize, ties: &str, aggregation: Option<&str>) -> PredictToml {
        PredictToml {
            k,
            ties: ties.to_string(),
            aggregation: aggregation.map(str::to_string),
        }
    }

    #[test]
    fn test_build_metric() {
        assert_eq!(build_metric(&distance("Manhattan", 2.0)).unwrap(), Metric::Manhattan);
        assert_eq!(
            build_metric(&distance("minkowski", 1.5)).unwrap(),
            Metric::Minkowski { p: 1.5 }
        );
    }

    #[test]
    fn test_build_metric_errors() {
        assert!(matches!(
            build_metric(&distance("cosine", 2.0)),
            Err(ConfigError::Distance(DistanceError::InvalidMetric { .. }))
        ));
        assert!(matches!(
            build_metric(&distance("minkowski", 0.0)),
            Err(ConfigError::Distance(DistanceError::InvalidMinkowskiPower { .. }))
        ));
    }

    #[test]
    fn test_build_predict_config() {
        let cfg =
            build_predict_config(&predict(4, "first", Some("max")), &AggregationRegistry::new())
                .unwrap();
        assert_eq!(cfg.k(), 4);
        assert_eq!(cfg.ties(), TiePolicy::First);
        assert_eq!(cfg.aggregation(), Some(&Aggregation::Max));
    }

    #[test]
    fn test_custom_aggregation_by_name() {
        let mut registry = AggregationRegistry::new();
        registry.register("first_value", |v: &[f64]| v[0]).unwrap();
        let cfg = build_predict_config(&predict(2, "min", Some("first_value")), &registry).unwrap();
        assert_eq!(cfg.aggregation().map(Aggregation::name), Some("first_value"));
    }

    #[test]
    fn test_build_predict_config_errors() {
        let registry = AggregationRegistry::new();
        assert!(matches!(
            build_predict_config(&predict(0, "min", None), &registry),
            Err(ConfigError::Invalid { field: "predict.k", .. })
        ));
        assert!(matches!(
            build_predict_config(&predict(1, "average", None), &registry),
            Err(ConfigError::Knn(KnnError::InvalidTiePolicy { .. }))
        ));
        assert!(matches!(
            build_predict_config(&predict(1, "min", Some("mode")), &registry),
            Err(ConfigError::Knn(KnnError::UnknownAggregationMethod { .. }))
        ));
    }
}
