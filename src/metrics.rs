//! Session statistics for the salary predictor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for prediction requests
pub struct PredictionMetrics {
    /// Successful predictions
    pub predictions: AtomicU64,
    /// Requests rejected with a per-request error
    pub rejections: AtomicU64,
    /// Predictions by decoded label
    by_label: RwLock<HashMap<String, u64>>,
    /// Rejections by error kind
    by_error: RwLock<HashMap<&'static str, u64>>,
    /// Request latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PredictionMetrics {
    pub fn new() -> Self {
        Self {
            predictions: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
            by_label: RwLock::new(HashMap::new()),
            by_error: RwLock::new(HashMap::new()),
            latencies: RwLock::new(Vec::with_capacity(64)),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, label: &str, latency: Duration) {
        self.predictions.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_label) = self.by_label.write() {
            *by_label.entry(label.to_string()).or_insert(0) += 1;
        }

        if let Ok(mut latencies) = self.latencies.write() {
            latencies.push(latency.as_micros() as u64);
            // Keep only the most recent 10000
            if latencies.len() > 10000 {
                latencies.drain(0..5000);
            }
        }
    }

    /// Record a rejected request
    pub fn record_rejection(&self, kind: &'static str) {
        self.rejections.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_error) = self.by_error.write() {
            *by_error.entry(kind).or_insert(0) += 1;
        }
    }

    /// Latency statistics over successful predictions
    pub fn latency_stats(&self) -> LatencyStats {
        let Ok(latencies) = self.latencies.read() else {
            return LatencyStats::default();
        };
        if latencies.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted = latencies.clone();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: u64 = sorted.iter().sum();
        let percentile = |p: f64| sorted[((count as f64 * p) as usize).min(count - 1)];

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: percentile(0.50),
            p95_us: percentile(0.95),
            p99_us: percentile(0.99),
            max_us: sorted[count - 1],
        }
    }

    pub fn predictions_by_label(&self) -> HashMap<String, u64> {
        self.by_label
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn rejections_by_error(&self) -> HashMap<&'static str, u64> {
        self.by_error
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let predictions = self.predictions.load(Ordering::Relaxed);
        let rejections = self.rejections.load(Ordering::Relaxed);
        let total = predictions + rejections;
        let rejection_rate = if total > 0 {
            (rejections as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let latency = self.latency_stats();

        info!(
            predictions = predictions,
            rejections = rejections,
            rejection_rate = format!("{:.1}%", rejection_rate),
            session_secs = self.start_time.elapsed().as_secs(),
            "Session summary"
        );
        info!(
            mean_us = latency.mean_us,
            p50_us = latency.p50_us,
            p95_us = latency.p95_us,
            p99_us = latency.p99_us,
            max_us = latency.max_us,
            "Prediction latency"
        );
        for (label, count) in self.predictions_by_label() {
            let pct = if predictions > 0 {
                (count as f64 / predictions as f64) * 100.0
            } else {
                0.0
            };
            info!(label = %label, count = count, share = format!("{:.1}%", pct), "Predictions by label");
        }
        for (kind, count) in self.rejections_by_error() {
            info!(error = kind, count = count, "Rejections by error");
        }
    }
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency statistics
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = PredictionMetrics::new();

        metrics.record_prediction(">50K", Duration::from_micros(100));
        metrics.record_prediction("<=50K", Duration::from_micros(200));
        metrics.record_prediction("<=50K", Duration::from_micros(300));
        metrics.record_rejection("out_of_range");

        assert_eq!(metrics.predictions.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.rejections.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.predictions_by_label()["<=50K"], 2);
        assert_eq!(metrics.rejections_by_error()["out_of_range"], 1);
    }

    #[test]
    fn test_latency_stats() {
        let metrics = PredictionMetrics::new();
        for us in [10, 20, 30, 40] {
            metrics.record_prediction(">50K", Duration::from_micros(us));
        }

        let stats = metrics.latency_stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean_us, 25);
        assert_eq!(stats.p50_us, 30);
        assert_eq!(stats.max_us, 40);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(PredictionMetrics::new().latency_stats(), LatencyStats::default());
    }
}
