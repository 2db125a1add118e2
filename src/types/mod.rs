//! Type definitions for the salary predictor

pub mod fields;
pub mod person;
pub mod prediction;

pub use fields::{CategoricalField, NumericField};
pub use person::PersonInput;
pub use prediction::PredictionOutcome;
