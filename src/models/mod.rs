//! Trained artifacts and inference

pub mod classifier;
pub mod codec;
pub mod inference;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod scaler;

pub use classifier::{Classifier, LinearClassifier};
pub use codec::{CodecSet, LabelCodec};
pub use inference::{Prediction, PredictionService};
pub use loader::{ArtifactLoader, Artifacts};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use scaler::StandardScaler;
