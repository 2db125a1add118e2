//! Feature encoding for income-bracket inference.
//!
//! Turns raw form values into the numeric record the scaler and classifier
//! were fitted on.

use crate::config::InputBounds;
use crate::error::PredictError;
use crate::models::codec::LabelCodec;
use crate::models::loader::Artifacts;
use crate::types::{CategoricalField, NumericField, PersonInput};
use std::sync::Arc;

/// Number of model input features
pub const FEATURE_COUNT: usize = 13;

/// Column order used at fitting time. Reordering corrupts predictions.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "workclass",
    "education",
    "educational-num",
    "marital-status",
    "occupation",
    "relationship",
    "race",
    "gender",
    "capital-gain",
    "capital-loss",
    "hours-per-week",
    "native-country",
];

/// Source of one feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

/// Column layout, aligned with [`FEATURE_NAMES`]
pub const FEATURE_LAYOUT: [FeatureSource; FEATURE_COUNT] = [
    FeatureSource::Numeric(NumericField::Age),
    FeatureSource::Categorical(CategoricalField::Workclass),
    FeatureSource::Categorical(CategoricalField::Education),
    FeatureSource::Numeric(NumericField::EducationalNum),
    FeatureSource::Categorical(CategoricalField::MaritalStatus),
    FeatureSource::Categorical(CategoricalField::Occupation),
    FeatureSource::Categorical(CategoricalField::Relationship),
    FeatureSource::Categorical(CategoricalField::Race),
    FeatureSource::Categorical(CategoricalField::Gender),
    FeatureSource::Numeric(NumericField::CapitalGain),
    FeatureSource::Numeric(NumericField::CapitalLoss),
    FeatureSource::Numeric(NumericField::HoursPerWeek),
    FeatureSource::Categorical(CategoricalField::NativeCountry),
];

/// One encoded person, in schema order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord([f64; FEATURE_COUNT]);

impl FeatureRecord {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value of a named column
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }
}

/// Encodes raw person attributes into model input features.
#[derive(Clone)]
pub struct FeatureEncoder {
    artifacts: Arc<Artifacts>,
    bounds: InputBounds,
}

impl FeatureEncoder {
    pub fn new(artifacts: Arc<Artifacts>, bounds: InputBounds) -> Self {
        Self { artifacts, bounds }
    }

    pub fn bounds(&self) -> &InputBounds {
        &self.bounds
    }

    /// Encode one person.
    ///
    /// Categorical labels become codec codes; numeric values are
    /// bound-checked and passed through.
    pub fn encode(&self, person: &PersonInput) -> Result<FeatureRecord, PredictError> {
        let mut values = [0.0; FEATURE_COUNT];

        for (slot, source) in values.iter_mut().zip(FEATURE_LAYOUT) {
            *slot = match source {
                FeatureSource::Numeric(field) => self.check_bound(field, person.numeric(field))?,
                FeatureSource::Categorical(field) => self.encode_category(field, person)? as f64,
            };
        }

        Ok(FeatureRecord(values))
    }

    /// Known labels and codes of one categorical field
    pub fn codec(&self, field: CategoricalField) -> &LabelCodec {
        self.artifacts.codecs.get(field)
    }

    /// Map a categorical code back to its label
    pub fn decode_category(&self, field: CategoricalField, code: i64) -> Option<&str> {
        self.codec(field).decode(code)
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching training order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }

    fn encode_category(
        &self,
        field: CategoricalField,
        person: &PersonInput,
    ) -> Result<usize, PredictError> {
        let value = person.category(field).unwrap_or_default();
        self.codec(field).encode(value)
    }

    fn check_bound(&self, field: NumericField, value: i64) -> Result<f64, PredictError> {
        let bound = self.bounds.get(field);
        if bound.contains(value) {
            Ok(value as f64)
        } else {
            Err(PredictError::OutOfRange {
                field,
                value,
                min: bound.min,
                max: bound.max,
            })
        }
    }
}
