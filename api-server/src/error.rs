//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use wifi_sentinel_core::SentinelError;

pub type AppResult<T> = Result<T, AppError>;

/// Every variant answers 500 with `{"error": message}`
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Sentinel(#[from] SentinelError),

    // Blocking task panicked or was cancelled
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            AppError::Sentinel(SentinelError::NoNetworks) => tracing::warn!("Scan error: {}", message),
            AppError::Sentinel(e) => tracing::error!("Scan error: {}", e),
            AppError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
        }

        let body = Json(json!({ "error": message }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
