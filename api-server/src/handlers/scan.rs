//! WiFi scan handler

use axum::{extract::State, Json};

use wifi_sentinel_core::{run_rich_scan, RichNetwork, ScanReport};

use crate::{AppResult, AppState};

/// Scan, log, refit and score. The whole pipeline blocks (settle delay,
/// file IO, model fit) so it runs off the async workers.
pub async fn scan_wifi(State(state): State<AppState>) -> AppResult<Json<ScanReport<RichNetwork>>> {
    tracing::info!("WiFi scan requested");

    let report = tokio::task::spawn_blocking(move || {
        run_rich_scan(&state.config.sentinel, state.scanner.as_ref(), &state.store)
    })
    .await??;

    tracing::info!(
        networks = report.stats.total_networks,
        suspicious = report.stats.suspicious_count,
        "WiFi scan complete"
    );

    Ok(Json(report))
}
