//! Fitted standard scaler

use crate::feature_encoder::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Serialized scaler statistics (`mean_` / `scale_` of the fitted scaler).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Column order the scaler was fitted with, if exported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Per-feature standardization `(x - mean) / scale` with training-time
/// statistics. Never refitted.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: &[f64], scale: &[f64]) -> Result<Self> {
        let mean: [f64; FEATURE_COUNT] = match mean.try_into() {
            Ok(m) => m,
            Err(_) => bail!(
                "scaler mean has {} entries, expected {}",
                mean.len(),
                FEATURE_COUNT
            ),
        };
        let scale: [f64; FEATURE_COUNT] = match scale.try_into() {
            Ok(s) => s,
            Err(_) => bail!(
                "scaler scale has {} entries, expected {}",
                scale.len(),
                FEATURE_COUNT
            ),
        };

        for (i, name) in FEATURE_NAMES.iter().enumerate() {
            if !mean[i].is_finite() {
                bail!("scaler mean for '{}' is not finite", name);
            }
            // A fitted scaler stores 1.0 for constant columns, so zero means corruption
            if !scale[i].is_finite() || scale[i] == 0.0 {
                bail!("scaler scale for '{}' is invalid: {}", name, scale[i]);
            }
        }

        Ok(Self { mean, scale })
    }

    /// Validate an exported artifact, including its column order.
    pub fn from_artifact(artifact: &ScalerArtifact) -> Result<Self> {
        if let Some(names) = &artifact.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                bail!(
                    "scaler was fitted on columns {:?}, expected {:?}",
                    names,
                    FEATURE_NAMES
                );
            }
        }
        Self::new(&artifact.mean, &artifact.scale)
    }

    pub fn to_artifact(&self) -> ScalerArtifact {
        ScalerArtifact {
            feature_names: Some(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()),
            mean: self.mean.to_vec(),
            scale: self.scale.to_vec(),
        }
    }

    pub fn transform(&self, record: &FeatureRecord) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in record.values().iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: [f64; FEATURE_COUNT]) -> FeatureRecord {
        FeatureRecord::from_values(values)
    }

    #[test]
    fn test_transform_standardizes_each_column() {
        let mean = [10.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        scale[0] = 2.0;
        let scaler = StandardScaler::new(&mean, &scale).unwrap();

        let scaled = scaler.transform(&record([14.0; FEATURE_COUNT]));

        assert_eq!(scaled[0], 2.0);
        assert_eq!(scaled[1], 4.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let scaler = StandardScaler::new(&[3.0; FEATURE_COUNT], &[7.0; FEATURE_COUNT]).unwrap();
        let input = record([1.5; FEATURE_COUNT]);
        assert_eq!(scaler.transform(&input), scaler.transform(&input));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = StandardScaler::new(&[0.0; 12], &[1.0; FEATURE_COUNT]).unwrap_err();
        assert!(err.to_string().contains("12 entries"));
    }

    #[test]
    fn test_rejects_zero_or_nan_scale() {
        let mut scale = [1.0; FEATURE_COUNT];
        scale[5] = 0.0;
        assert!(StandardScaler::new(&[0.0; FEATURE_COUNT], &scale).is_err());

        scale[5] = f64::NAN;
        assert!(StandardScaler::new(&[0.0; FEATURE_COUNT], &scale).is_err());
    }

    #[test]
    fn test_artifact_column_order_is_checked() {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        let artifact = ScalerArtifact {
            feature_names: Some(names.clone()),
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        assert!(StandardScaler::from_artifact(&artifact).is_ok());

        names.swap(9, 10);
        let swapped = ScalerArtifact {
            feature_names: Some(names),
            ..artifact
        };
        let err = StandardScaler::from_artifact(&swapped).unwrap_err();
        assert!(err.to_string().contains("fitted on columns"));
    }

    #[test]
    fn test_artifact_without_names_is_accepted() {
        let artifact: ScalerArtifact = serde_json::from_str(&format!(
            r#"{{"mean": {:?}, "scale": {:?}}}"#,
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT]
        ))
        .unwrap();
        let scaler = StandardScaler::from_artifact(&artifact).unwrap();
        assert_eq!(StandardScaler::from_artifact(&scaler.to_artifact()).unwrap(), scaler);
    }
}
