//! Classifier interface and the linear-model backend

use crate::feature_encoder::{FEATURE_COUNT, FEATURE_NAMES};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted decision function over one scaled feature record.
///
/// Implementations are immutable after loading and shared across requests.
pub trait Classifier: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Predict the class index for a scaled record of [`FEATURE_COUNT`] values.
    fn predict_class(&self, scaled: &[f64]) -> Result<i64>;
}

impl fmt::Debug for dyn Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier").field("name", &self.name()).finish()
    }
}

/// Serialized binary linear model (`coef_` / `intercept_` / `classes_`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Class emitted for a non-positive / positive decision value
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

/// Binary linear classifier: class is `classes[1]` when `w·x + b > 0`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    pub fn new(coefficients: &[f64], intercept: f64, classes: [i64; 2]) -> Result<Self> {
        let coefficients: [f64; FEATURE_COUNT] = match coefficients.try_into() {
            Ok(c) => c,
            Err(_) => bail!(
                "linear model has {} coefficients, expected {}",
                coefficients.len(),
                FEATURE_COUNT
            ),
        };

        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            bail!("coefficient for '{}' is not finite", FEATURE_NAMES[i]);
        }
        if !intercept.is_finite() {
            bail!("intercept is not finite");
        }

        Ok(Self {
            coefficients,
            intercept,
            classes,
        })
    }

    pub fn from_artifact(artifact: &LinearModelArtifact) -> Result<Self> {
        Self::new(&artifact.coefficients, artifact.intercept, artifact.classes)
    }

    pub fn to_artifact(&self) -> LinearModelArtifact {
        LinearModelArtifact {
            coefficients: self.coefficients.to_vec(),
            intercept: self.intercept,
            classes: self.classes,
        }
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, scaled: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict_class(&self, scaled: &[f64]) -> Result<i64> {
        if scaled.len() != FEATURE_COUNT {
            bail!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                scaled.len()
            );
        }

        let decision = self.decision_function(scaled);
        if !decision.is_finite() {
            bail!("decision value is not finite");
        }

        Ok(if decision > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }
}
