//! Salary Predictor Library
//!
//! Encodes a person's census attributes, scales them with training-time
//! statistics and classifies the income bracket (`>50K` / `<=50K`) using
//! externally trained artifacts.

pub mod config;
pub mod demo;
pub mod error;
pub mod feature_encoder;
pub mod form;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod types;

pub use config::AppConfig;
pub use error::PredictError;
pub use feature_encoder::{FeatureEncoder, FeatureRecord};
pub use form::FormSession;
pub use models::{ArtifactLoader, Artifacts, PredictionService};
pub use pipeline::Predictor;
pub use types::{person::PersonInput, prediction::PredictionOutcome};
