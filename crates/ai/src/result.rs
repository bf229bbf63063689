use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Output of an insight job.
///
/// Advisory only: it can be displayed or stored by higher layers, but nothing
/// acts on it automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResult {
    /// Primary score (job-specific meaning; the rebalance job reports the suggestion count).
    pub score: f64,

    /// Confidence in \[0, 1\].
    pub confidence: f64,

    pub explanation: Option<String>,

    /// Job payload and parameters.
    pub metadata: JsonValue,
}

impl AiResult {
    pub fn new(score: f64, confidence: f64) -> Self {
        Self {
            score,
            confidence,
            explanation: None,
            metadata: JsonValue::Null,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid job input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}
