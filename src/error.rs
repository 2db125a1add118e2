//! Per-request error taxonomy.
//!
//! Startup failures (config, artifacts) are `anyhow::Error` and abort the
//! process. Everything here is scoped to a single prediction request.

use crate::types::{CategoricalField, NumericField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Categorical value not in the codec's known label set.
    #[error("unknown {field} category: {value:?}")]
    UnknownCategory {
        field: CategoricalField,
        value: String,
    },

    /// Numeric value outside its inclusive bound.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: NumericField,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Classifier produced a class the income codec cannot decode.
    /// Means the artifacts come from different training runs.
    #[error("classifier returned class {index}, income codec has {known} labels")]
    UnknownClass { index: i64, known: usize },

    #[error("classifier failed: {0}")]
    Classifier(String),
}

impl PredictError {
    /// True for errors caused by the submitted values.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::UnknownCategory { .. } | Self::OutOfRange { .. })
    }

    /// Short stable name, used as a metrics key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => "unknown_category",
            Self::OutOfRange { .. } => "out_of_range",
            Self::UnknownClass { .. } => "unknown_class",
            Self::Classifier(_) => "classifier",
        }
    }

    /// Message shown on the form. Internal failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownCategory { field, value } => {
                format!("\"{}\" is not a known {} value", value, field.title())
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => format!(
                "{} must be between {} and {} (got {})",
                field.title(),
                min,
                max,
                value
            ),
            Self::UnknownClass { .. } | Self::Classifier(_) => {
                "Prediction failed due to an internal error. Please try again later.".to_string()
            }
        }
    }
}
