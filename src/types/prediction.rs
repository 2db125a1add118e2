//! Prediction outcome data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one successful prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// Unique request identifier
    pub request_id: String,

    /// Decoded income label (e.g. `>50K`)
    pub label: String,

    /// Raw class index returned by the classifier
    pub class_index: i64,

    /// Time the prediction was produced
    pub timestamp: DateTime<Utc>,

    /// End-to-end encode + predict time
    pub latency_us: u64,
}

impl PredictionOutcome {
    /// Create a new outcome with a fresh request id
    pub fn new(label: String, class_index: i64) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            label,
            class_index,
            timestamp: Utc::now(),
            latency_us: 0,
        }
    }

    /// Attach the measured latency
    pub fn with_latency_us(mut self, latency_us: u64) -> Self {
        self.latency_us = latency_us;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_ids_are_unique() {
        let a = PredictionOutcome::new(">50K".to_string(), 1);
        let b = PredictionOutcome::new(">50K".to_string(), 1);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = PredictionOutcome::new("<=50K".to_string(), 0).with_latency_us(42);

        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: PredictionOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.request_id, outcome.request_id);
        assert_eq!(deserialized.label, "<=50K");
        assert_eq!(deserialized.latency_us, 42);
    }
}
