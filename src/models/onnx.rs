//! ONNX Runtime classifier backend

use crate::models::classifier::Classifier;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};

/// Classifier exported to ONNX (e.g. via skl2onnx).
///
/// Reads the integer `label` output; falls back to the arg-max of a float
/// probability output when the graph has no label tensor.
pub struct OnnxClassifier {
    name: String,
    /// Sessions need `&mut` to run
    session: RwLock<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxClassifier {
    /// Load an ONNX model from file
    pub fn load<P: AsRef<Path>>(path: P, onnx_threads: usize) -> Result<Self> {
        let path = path.as_ref();

        ort::init().commit()?;
        info!(path = %path.display(), threads = onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(onnx_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("ONNX model has no inputs")?;

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .context("ONNX model has no outputs")?;

        info!(
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(Self {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "onnx".to_string()),
            session: RwLock::new(session),
            input_name,
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_class(&self, scaled: &[f64]) -> Result<i64> {
        // Input tensor shape [1, num_features]
        let features: Vec<f32> = scaled.iter().map(|&v| v as f32).collect();
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, features)).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_tensor])?;
        let output = outputs
            .get(self.output_name.as_str())
            .with_context(|| format!("missing output '{}'", self.output_name))?;

        if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            let class = labels.first().copied().context("empty label output")?;
            debug!(model = %self.name, class = class, "Extracted label");
            return Ok(class);
        }

        let (_, probs) = output
            .try_extract_tensor::<f32>()
            .context("output is neither an int64 label nor a float tensor")?;
        let class = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i as i64)
            .context("empty probability output")?;
        debug!(model = %self.name, class = class, "Extracted arg-max class");
        Ok(class)
    }
}
