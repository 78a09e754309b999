use thiserror::Error;

/// Common error type for the Hadoop exporters.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field '{field}' in {record}")]
    MissingField { record: String, field: String },

    #[error("Invalid field '{field}' in {record}: {reason}")]
    InvalidField {
        record: String,
        field: String,
        reason: String,
    },

    #[error("Unknown node state: {0}")]
    UnknownNodeState(String),

    #[error("Metric {metric} declares {expected} labels, sample supplied {actual}")]
    LabelCardinality {
        metric: String,
        expected: usize,
        actual: usize,
    },

    #[error("No metric family declared for field '{0}'")]
    UnknownMetric(String),

    #[error("Failed to encode metrics")]
    Encode(#[from] std::fmt::Error),
}

impl Error {
    /// Create a missing-field error.
    pub fn missing(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Create an invalid-field error.
    pub fn invalid(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            record: record.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using the exporter's Error.
pub type Result<T> = std::result::Result<T, Error>;
