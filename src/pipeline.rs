//! Per-request prediction boundary.

use crate::config::InputBounds;
use crate::error::PredictError;
use crate::feature_encoder::FeatureEncoder;
use crate::metrics::PredictionMetrics;
use crate::models::inference::PredictionService;
use crate::models::loader::Artifacts;
use crate::types::{PersonInput, PredictionOutcome};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Encoder and prediction service over one shared artifact set.
///
/// Errors are logged and counted here and returned to the caller; none of
/// them end the process.
pub struct Predictor {
    encoder: FeatureEncoder,
    service: PredictionService,
    metrics: Arc<PredictionMetrics>,
}

impl Predictor {
    /// Fails when a bound is inverted.
    pub fn new(
        artifacts: Arc<Artifacts>,
        bounds: InputBounds,
        metrics: Arc<PredictionMetrics>,
    ) -> anyhow::Result<Self> {
        bounds.validate()?;

        Ok(Self {
            encoder: FeatureEncoder::new(artifacts.clone(), bounds),
            service: PredictionService::new(artifacts),
            metrics,
        })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn metrics(&self) -> &Arc<PredictionMetrics> {
        &self.metrics
    }

    /// Encode and predict one person.
    pub fn predict(&self, person: &PersonInput) -> Result<PredictionOutcome, PredictError> {
        let start_time = Instant::now();

        let result = self
            .encoder
            .encode(person)
            .and_then(|record| self.service.predict(&record));

        match result {
            Ok(prediction) => {
                let latency = start_time.elapsed();
                let outcome = PredictionOutcome::new(prediction.label, prediction.class_index)
                    .with_latency_us(latency.as_micros() as u64);

                self.metrics.record_prediction(&outcome.label, latency);
                info!(
                    request_id = %outcome.request_id,
                    label = %outcome.label,
                    latency_us = outcome.latency_us,
                    "Prediction served"
                );
                Ok(outcome)
            }
            Err(e) => {
                self.metrics.record_rejection(e.kind());
                // Internal faults are already logged by the prediction service
                if e.is_user_error() {
                    warn!(error = %e, "Prediction request rejected");
                } else {
                    debug!(error = %e, "Prediction failed");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bound;
    use crate::demo;
    use crate::feature_encoder::FEATURE_COUNT;
    use crate::models::classifier::LinearClassifier;
    use crate::types::{CategoricalField, NumericField};
    use std::sync::atomic::Ordering;

    fn predictor() -> Predictor {
        Predictor::new(
            Arc::new(demo::demo_artifacts().unwrap()),
            InputBounds::default(),
            Arc::new(PredictionMetrics::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_person_gets_binary_label() {
        let predictor = predictor();
        let outcome = predictor.predict(&demo::reference_person()).unwrap();

        assert!(["<=50K", ">50K"].contains(&outcome.label.as_str()));
        assert_eq!(predictor.metrics().predictions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_rejections_are_returned_and_counted() {
        let predictor = predictor();

        let mut person = demo::reference_person();
        person.gender = "Unknown".to_string();
        assert!(matches!(
            predictor.predict(&person),
            Err(PredictError::UnknownCategory { field: CategoricalField::Gender, .. })
        ));

        let mut person = demo::reference_person();
        person.age = 101;
        assert!(matches!(
            predictor.predict(&person),
            Err(PredictError::OutOfRange { field: NumericField::Age, .. })
        ));

        let metrics = predictor.metrics();
        assert_eq!(metrics.rejections.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.predictions.load(Ordering::Relaxed), 0);

        // Still serving after rejections
        assert!(predictor.predict(&demo::reference_person()).is_ok());
    }

    #[test]
    fn test_high_earner_profile() {
        let mut person = demo::reference_person();
        person.age = 52;
        person.education = "Doctorate".to_string();
        person.educational_num = 16;
        person.marital_status = "Married-civ-spouse".to_string();
        person.occupation = "Exec-managerial".to_string();
        person.relationship = "Husband".to_string();
        person.capital_gain = 99_999;
        person.hours_per_week = 60;

        assert_eq!(predictor().predict(&person).unwrap().label, ">50K");
    }

    #[test]
    fn test_low_earner_profile() {
        let mut person = demo::reference_person();
        person.age = 19;
        person.education = "11th".to_string();
        person.educational_num = 7;
        person.relationship = "Own-child".to_string();
        person.capital_gain = 0;
        person.hours_per_week = 15;

        assert_eq!(predictor().predict(&person).unwrap().label, "<=50K");
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let bounds = InputBounds {
            capital_gain: Bound::new(10, 5),
            ..InputBounds::default()
        };
        let result = Predictor::new(
            Arc::new(demo::demo_artifacts().unwrap()),
            bounds,
            Arc::new(PredictionMetrics::new()),
        );

        let err = result.err().unwrap();
        assert!(err.to_string().contains("capital-gain"));
    }

    #[test]
    fn test_internal_errors_are_counted_by_kind() {
        // Model from a run whose income codes were {0, 2}
        let artifacts = Artifacts::new(
            Box::new(LinearClassifier::new(&[0.0; FEATURE_COUNT], 1.0, [0, 2]).unwrap()),
            demo::demo_scaler().unwrap(),
            demo::demo_codecs().unwrap(),
        )
        .unwrap();
        let predictor = Predictor::new(
            Arc::new(artifacts),
            InputBounds::default(),
            Arc::new(PredictionMetrics::new()),
        )
        .unwrap();

        let err = predictor.predict(&demo::reference_person()).unwrap_err();
        assert!(!err.is_user_error());

        let metrics = predictor.metrics();
        assert_eq!(metrics.rejections.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rejections_by_error()["unknown_class"], 1);
    }
}
