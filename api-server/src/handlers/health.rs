//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    scanner: &'static str,
    /// None when the history file cannot be read
    history_rows: Option<usize>,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.clone();
    let history_rows = tokio::task::spawn_blocking(move || store.row_count())
        .await
        .ok()
        .and_then(|r| r.map_err(|e| tracing::warn!("History unreadable: {}", e)).ok());

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        scanner: state.scanner.name(),
        history_rows,
    })
}
