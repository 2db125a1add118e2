//! Salary Predictor - Main Entry Point
//!
//! Loads the trained artifacts once, then serves predictions through the
//! interactive terminal form.

use anyhow::Result;
use salary_predictor::{
    config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH},
    form::FormSession,
    metrics::PredictionMetrics,
    models::ArtifactLoader,
    pipeline::Predictor,
};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("salary_predictor={}", logging.level)))?;

    // Logs go to stderr; stdout belongs to the form
    if logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load configuration
    let loaded = AppConfig::load_optional(DEFAULT_CONFIG_PATH)?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();
    init_logging(&config.logging)?;

    info!("Starting Salary Predictor v{}", env!("CARGO_PKG_VERSION"));
    if !from_file {
        info!(path = DEFAULT_CONFIG_PATH, "No config file found, using defaults");
    }
    info!(
        artifacts_dir = %config.artifacts.dir,
        model = %config.artifacts.model_file,
        "Configuration loaded"
    );

    // Artifact errors abort startup
    let loader = ArtifactLoader::new(&config.artifacts);
    let artifacts = loader.load()?;
    info!(
        model = %artifacts.classifier.name(),
        income_labels = ?artifacts.codecs.income().classes(),
        "Artifacts ready"
    );

    let metrics = Arc::new(PredictionMetrics::new());
    let predictor = Predictor::new(artifacts, config.bounds.clone(), metrics.clone())?;
    info!(
        features = predictor.encoder().feature_count(),
        "Predictor initialized"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = FormSession::new(
        &predictor,
        stdin.lock(),
        stdout.lock(),
        &config.form.default_native_country,
    );
    let shown = session.run()?;

    info!(predictions = shown, "Salary Predictor shutting down...");
    metrics.print_summary();

    Ok(())
}
