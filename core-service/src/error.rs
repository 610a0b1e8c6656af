//! Error handling

use thiserror::Error;

pub type SentinelResult<T> = Result<T, SentinelError>;

/// Failures of the platform scan backend
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No wireless interfaces found. Please ensure your device has WiFi.")]
    NoInterface,

    #[error("failed to run `{command}`: {reason}")]
    Process { command: String, reason: String },

    #[error("WiFi scan failed: {0}")]
    Failed(String),

    #[error("scan output parse error: {0}")]
    Parse(String),

    #[error("unsupported scan backend: {0}")]
    Unsupported(String),
}

/// Failures of the CSV history log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("history file {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },
}

/// Failures of the anomaly model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model was fit on {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid model parameter: {0}")]
    InvalidParameter(String),

    #[error("model used before fit")]
    NotFitted,

    #[error(transparent)]
    LayoutMismatch(#[from] crate::logic::features::LayoutMismatchError),
}

/// Umbrella error for one scan request
#[derive(Debug, Error)]
pub enum SentinelError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("No networks found.")]
    NoNetworks,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
