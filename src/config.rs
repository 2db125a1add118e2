//! Configuration management for the salary predictor

use crate::types::NumericField;
use anyhow::{bail, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub bounds: InputBounds,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Artifact locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory containing the artifact files
    pub dir: String,
    /// Label codecs, `{field: [labels]}`
    pub encoders_file: String,
    /// Scaler statistics
    pub scaler_file: String,
    /// Classifier (`.json` linear model or `.onnx`)
    pub model_file: String,
    /// Number of threads for ONNX inference (default: 1)
    pub onnx_threads: usize,
}

impl ArtifactsConfig {
    pub fn encoders_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.encoders_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.scaler_file)
    }

    pub fn model_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.model_file)
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            encoders_file: "label_encoders.json".to_string(),
            scaler_file: "scaler.json".to_string(),
            model_file: "model.json".to_string(),
            onnx_threads: 1,
        }
    }
}

/// Inclusive range for one numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bound {
    pub min: i64,
    pub max: i64,
}

impl Bound {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Accepted ranges for numeric inputs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub age: Bound,
    pub educational_num: Bound,
    pub capital_gain: Bound,
    pub capital_loss: Bound,
    pub hours_per_week: Bound,
}

impl InputBounds {
    pub fn get(&self, field: NumericField) -> Bound {
        match field {
            NumericField::Age => self.age,
            NumericField::EducationalNum => self.educational_num,
            NumericField::CapitalGain => self.capital_gain,
            NumericField::CapitalLoss => self.capital_loss,
            NumericField::HoursPerWeek => self.hours_per_week,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for field in NumericField::ALL {
            let bound = self.get(field);
            if bound.min > bound.max {
                bail!(
                    "invalid bound for {}: min {} > max {}",
                    field,
                    bound.min,
                    bound.max
                );
            }
        }
        Ok(())
    }
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            age: Bound::new(18, 100),
            educational_num: Bound::new(1, 16),
            capital_gain: Bound::new(0, 99_999),
            capital_loss: Bound::new(0, 99_999),
            hours_per_week: Bound::new(1, 99),
        }
    }
}

/// Interactive form settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Preselected native country when the optional field is left empty
    pub default_native_country: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_native_country: "United-States".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, or defaults if it is absent
    pub fn load() -> Result<Self> {
        Ok(Self::load_optional(DEFAULT_CONFIG_PATH)?.unwrap_or_default())
    }

    /// Load configuration from `path`; `None` when the file does not exist.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_path(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.bounds.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.artifacts.dir, "artifacts");
        assert_eq!(config.bounds.age, Bound::new(18, 100));
        assert_eq!(config.bounds.hours_per_week, Bound::new(1, 99));
        assert_eq!(config.form.default_native_country, "United-States");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_bound_is_inclusive() {
        let age = InputBounds::default().get(NumericField::Age);
        assert!(age.contains(18));
        assert!(age.contains(100));
        assert!(!age.contains(17));
        assert!(!age.contains(101));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[artifacts]\ndir = \"/srv/models\"\nmodel_file = \"best_model.onnx\"\n\n[bounds]\nage = {{ min = 21, max = 90 }}"
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();

        assert_eq!(config.artifacts.model_path(), Path::new("/srv/models/best_model.onnx"));
        assert_eq!(config.artifacts.scaler_file, "scaler.json");
        assert_eq!(config.bounds.age, Bound::new(21, 90));
        assert_eq!(config.bounds.capital_gain, Bound::new(0, 99_999));
    }

    #[test]
    fn test_inverted_bound_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[bounds]\nage = {{ min = 100, max = 18 }}").unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        assert!(AppConfig::load_optional(&missing).unwrap().is_none());

        std::fs::write(&missing, "[form]\ndefault_native_country = \"Canada\"\n").unwrap();
        let config = AppConfig::load_optional(&missing).unwrap().unwrap();
        assert_eq!(config.form.default_native_country, "Canada");
    }

    #[test]
    fn test_load_reads_default_path() {
        // Tests run from the package root, where the shipped file lives
        let config = AppConfig::load().unwrap();
        assert_eq!(config.bounds.age, Bound::new(18, 100));
        assert_eq!(config.artifacts.model_file, "model.json");
    }
}
