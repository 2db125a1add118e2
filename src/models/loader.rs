//! Artifact loader: classifier, scaler and label codecs

use crate::config::ArtifactsConfig;
use crate::models::classifier::{Classifier, LinearClassifier, LinearModelArtifact};
use crate::models::codec::CodecSet;
use crate::models::scaler::{ScalerArtifact, StandardScaler};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// The three artifacts of one training run, immutable after load.
#[derive(Debug)]
pub struct Artifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: StandardScaler,
    pub codecs: CodecSet,
}

impl Artifacts {
    /// Bundle artifacts, checking that they agree with each other.
    pub fn new(
        classifier: Box<dyn Classifier>,
        scaler: StandardScaler,
        codecs: CodecSet,
    ) -> Result<Self> {
        let income = codecs.income();
        if income.len() != 2 {
            bail!(
                "income codec has {} labels, the classifier is binary",
                income.len()
            );
        }

        Ok(Self {
            classifier,
            scaler,
            codecs,
        })
    }
}

/// Loads artifacts from disk once and hands out shared references.
pub struct ArtifactLoader {
    encoders_path: PathBuf,
    scaler_path: PathBuf,
    model_path: PathBuf,
    onnx_threads: usize,
    loaded: OnceLock<Arc<Artifacts>>,
}

impl ArtifactLoader {
    /// Create a loader for the configured artifact locations
    pub fn new(config: &ArtifactsConfig) -> Self {
        Self {
            encoders_path: config.encoders_path(),
            scaler_path: config.scaler_path(),
            model_path: config.model_path(),
            onnx_threads: config.onnx_threads,
            loaded: OnceLock::new(),
        }
    }

    /// Load all artifacts, or return the cached set from an earlier call.
    ///
    /// Any failure is fatal: no partial set is ever returned or cached.
    pub fn load(&self) -> Result<Arc<Artifacts>> {
        if let Some(artifacts) = self.loaded.get() {
            return Ok(artifacts.clone());
        }

        let codecs = load_codecs(&self.encoders_path)?;
        let scaler = load_scaler(&self.scaler_path)?;
        let classifier = load_classifier(&self.model_path, self.onnx_threads)?;
        let artifacts = Arc::new(Artifacts::new(classifier, scaler, codecs)?);

        info!(
            encoders = %self.encoders_path.display(),
            scaler = %self.scaler_path.display(),
            model = %self.model_path.display(),
            "Artifacts loaded"
        );

        Ok(self.loaded.get_or_init(|| artifacts).clone())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed {} in {}", what, path.display()))
}

/// Load the `field -> labels` codec map
pub fn load_codecs<P: AsRef<Path>>(path: P) -> Result<CodecSet> {
    let path = path.as_ref();
    let labels: BTreeMap<String, Vec<String>> = read_json(path, "label encoders")?;
    let codecs = CodecSet::from_map(labels)
        .with_context(|| format!("Invalid label encoders in {}", path.display()))?;

    info!(path = %path.display(), "Label encoders loaded");
    Ok(codecs)
}

/// Load the fitted scaler statistics
pub fn load_scaler<P: AsRef<Path>>(path: P) -> Result<StandardScaler> {
    let path = path.as_ref();
    let artifact: ScalerArtifact = read_json(path, "scaler")?;
    let scaler = StandardScaler::from_artifact(&artifact)
        .with_context(|| format!("Invalid scaler in {}", path.display()))?;

    info!(path = %path.display(), "Scaler loaded");
    Ok(scaler)
}

/// Load the classifier, choosing the backend by file extension
#[cfg_attr(not(feature = "onnx"), allow(unused_variables))]
pub fn load_classifier<P: AsRef<Path>>(path: P, onnx_threads: usize) -> Result<Box<dyn Classifier>> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    match extension {
        "json" => {
            let artifact: LinearModelArtifact = read_json(path, "linear model")?;
            let model = LinearClassifier::from_artifact(&artifact)
                .with_context(|| format!("Invalid linear model in {}", path.display()))?;
            info!(path = %path.display(), "Linear model loaded");
            Ok(Box::new(model))
        }
        #[cfg(feature = "onnx")]
        "onnx" => Ok(Box::new(crate::models::onnx::OnnxClassifier::load(
            path,
            onnx_threads,
        )?)),
        #[cfg(not(feature = "onnx"))]
        "onnx" => bail!(
            "{} is an ONNX model but the `onnx` feature is disabled",
            path.display()
        ),
        other => bail!(
            "Unsupported model format {:?} for {}",
            other,
            path.display()
        ),
    }
}
