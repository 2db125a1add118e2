//! Prediction service: scale, classify, decode

use crate::error::PredictError;
use crate::feature_encoder::{FeatureRecord, FEATURE_COUNT};
use crate::models::loader::Artifacts;
use std::sync::Arc;
use tracing::{debug, error};

/// Decoded prediction for one record
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Label from the income codec
    pub label: String,
    /// Raw classifier output
    pub class_index: i64,
}

/// Stateless transform from feature record to income label.
#[derive(Clone)]
pub struct PredictionService {
    artifacts: Arc<Artifacts>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self { artifacts }
    }

    /// Apply the training-time scaler to a record
    pub fn scale(&self, record: &FeatureRecord) -> [f64; FEATURE_COUNT] {
        self.artifacts.scaler.transform(record)
    }

    /// Scale the record, classify it and decode the class index.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, PredictError> {
        let scaled = self.scale(record);
        let classifier = &self.artifacts.classifier;

        let class_index = classifier.predict_class(&scaled).map_err(|e| {
            error!(model = %classifier.name(), error = %e, "Classifier failed");
            PredictError::Classifier(format!("{:#}", e))
        })?;

        let income = self.artifacts.codecs.income();
        let label = income.decode(class_index).ok_or_else(|| {
            error!(
                model = %classifier.name(),
                class_index = class_index,
                known = income.len(),
                "Classifier output not in income codec; artifacts are from different runs"
            );
            PredictError::UnknownClass {
                index: class_index,
                known: income.len(),
            }
        })?;

        debug!(
            model = %classifier.name(),
            class_index = class_index,
            label = %label,
            "Prediction complete"
        );

        Ok(Prediction {
            label: label.to_string(),
            class_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::models::classifier::{Classifier, LinearClassifier};
    use crate::models::scaler::StandardScaler;

    /// Always returns the same class
    struct FixedClassifier(i64);

    impl Classifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_class(&self, _scaled: &[f64]) -> anyhow::Result<i64> {
            Ok(self.0)
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict_class(&self, _scaled: &[f64]) -> anyhow::Result<i64> {
            anyhow::bail!("session crashed")
        }
    }

    fn service_with(classifier: Box<dyn Classifier>) -> PredictionService {
        let artifacts = Artifacts::new(
            classifier,
            demo::demo_scaler().unwrap(),
            demo::demo_codecs().unwrap(),
        )
        .unwrap();
        PredictionService::new(Arc::new(artifacts))
    }

    #[test]
    fn test_decodes_class_through_income_codec() {
        let record = FeatureRecord::from_values([0.0; FEATURE_COUNT]);

        let low = service_with(Box::new(FixedClassifier(0))).predict(&record).unwrap();
        let high = service_with(Box::new(FixedClassifier(1))).predict(&record).unwrap();

        assert_eq!(low.label, "<=50K");
        assert_eq!(high.label, ">50K");
        assert_eq!(high.class_index, 1);
    }

    #[test]
    fn test_unknown_class_is_consistency_error() {
        let service = service_with(Box::new(FixedClassifier(2)));
        let err = service
            .predict(&FeatureRecord::from_values([0.0; FEATURE_COUNT]))
            .unwrap_err();

        assert_eq!(err, PredictError::UnknownClass { index: 2, known: 2 });
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_classifier_failure_is_surfaced() {
        let service = service_with(Box::new(FailingClassifier));
        let err = service
            .predict(&FeatureRecord::from_values([0.0; FEATURE_COUNT]))
            .unwrap_err();

        assert_eq!(err.kind(), "classifier");
        assert!(err.to_string().contains("session crashed"));
    }

    #[test]
    fn test_uses_stored_scaler_statistics() {
        // Mean 10, scale 2 on column 0; model fires when scaled age > 1
        let mut mean = [0.0; FEATURE_COUNT];
        mean[0] = 10.0;
        let mut scale = [1.0; FEATURE_COUNT];
        scale[0] = 2.0;
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;

        let artifacts = Artifacts::new(
            Box::new(LinearClassifier::new(&coefficients, -1.0, [0, 1]).unwrap()),
            StandardScaler::new(&mean, &scale).unwrap(),
            demo::demo_codecs().unwrap(),
        )
        .unwrap();
        let service = PredictionService::new(Arc::new(artifacts));

        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 12.0; // scaled 1.0, on the boundary
        assert_eq!(service.predict(&FeatureRecord::from_values(values)).unwrap().label, "<=50K");

        values[0] = 12.5;
        assert_eq!(service.scale(&FeatureRecord::from_values(values))[0], 1.25);
        assert_eq!(service.predict(&FeatureRecord::from_values(values)).unwrap().label, ">50K");
    }

    #[test]
    fn test_repeated_predictions_are_identical() {
        let service = PredictionService::new(Arc::new(demo::demo_artifacts().unwrap()));
        let record = FeatureRecord::from_values([
            39.0, 7.0, 9.0, 13.0, 4.0, 1.0, 1.0, 4.0, 1.0, 2174.0, 0.0, 40.0, 39.0,
        ]);

        let first = service.predict(&record).unwrap();
        for _ in 0..50 {
            assert_eq!(service.predict(&record).unwrap(), first);
        }
    }
}
