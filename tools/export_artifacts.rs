//! Demo Artifact Exporter
//!
//! Writes a consistent codec / scaler / linear-model set so the predictor
//! can be run without a training run.
//!
//! Usage: export-artifacts [DIR]   (default: artifacts)

use salary_predictor::{
    config::{ArtifactsConfig, InputBounds},
    demo,
    metrics::PredictionMetrics,
    models::ArtifactLoader,
    pipeline::Predictor,
};
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("export_artifacts=info".parse()?)
                .add_directive("salary_predictor=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let dir = args.get(1).map(|s| s.as_str()).unwrap_or("artifacts");

    info!(dir = %dir, "Exporting demo artifacts");
    demo::write_demo_artifacts(dir)?;

    // Reload through the normal path so a bad export fails here, not at startup
    let config = ArtifactsConfig {
        dir: dir.to_string(),
        ..ArtifactsConfig::default()
    };
    let artifacts = ArtifactLoader::new(&config).load()?;
    let predictor = Predictor::new(
        artifacts,
        InputBounds::default(),
        Arc::new(PredictionMetrics::new()),
    )?;

    let person = demo::reference_person();
    match predictor.predict(&person) {
        Ok(outcome) => info!(
            label = %outcome.label,
            sample = %serde_json::to_string(&person)?,
            "Export verified"
        ),
        Err(e) => anyhow::bail!("exported artifacts failed the sample prediction: {}", e),
    }

    Ok(())
}
