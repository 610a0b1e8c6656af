//! WiFi Sentinel API Server
//!
//! HTTP front of the scan pipeline used by the dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      WIFI SENTINEL API                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐   │
//! │  │  Router   │──▶│  spawn_blocking: scan → append →      │   │
//! │  │  (Axum)   │   │  reload → features → forest → report │   │
//! │  └───────────┘   └──────────────────┬───────────────────┘   │
//! │                                     ▼                        │
//! │                           ┌──────────────────┐               │
//! │                           │  rich CSV history │               │
//! │                           └──────────────────┘               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wifi_sentinel_core::{create_scanner, HistorySchema, HistoryStore, WlanScanPort};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "wifi_sentinel_api=debug,wifi_sentinel_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (core `log` records are bridged by tracing-log)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs || config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("WiFi Sentinel API starting ({})...", config.environment);

    // Build application state
    let scanner: Arc<dyn WlanScanPort> = Arc::from(create_scanner(&config.sentinel));
    let store = Arc::new(HistoryStore::new(&config.sentinel.rich_history_file, HistorySchema::Rich));
    tracing::info!("Scanner: {}", scanner.name());
    tracing::info!("History: {}", store.path().display());

    let state = AppState {
        config: config.clone(),
        scanner,
        store,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub scanner: Arc<dyn WlanScanPort>,
    pub store: Arc<HistoryStore>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/scan-wifi", post(handlers::scan::scan_wifi))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use wifi_sentinel_core::logic::scanner::{RawObservation, ReplayScanner};
    use wifi_sentinel_core::SentinelConfig;

    fn obs(ssid: &str, bssid: &str, signal: f64, channel: u16) -> RawObservation {
        RawObservation {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            signal_dbm: signal,
            freq_mhz: None,
            channel: Some(channel),
        }
    }

    fn test_state(dir: &TempDir, observations: Vec<RawObservation>) -> AppState {
        let sentinel = SentinelConfig {
            rich_history_file: dir.path().join("rich.csv"),
            ..SentinelConfig::default()
        };
        let store = Arc::new(HistoryStore::new(&sentinel.rich_history_file, HistorySchema::Rich));

        AppState {
            config: config::Config {
                port: 0,
                environment: "test".to_string(),
                json_logs: false,
                sentinel,
            },
            scanner: Arc::new(ReplayScanner::fixed(observations)),
            store,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn scan_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/scan-wifi")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_scan_returns_report() {
        let dir = TempDir::new().unwrap();
        let state = test_state(
            &dir,
            vec![
                obs("Home", "aa:bb:cc:00:00:01", -45.0, 6),
                obs("Home", "aa:bb:cc:00:00:02", -50.0, 6),
                obs("Cafe", "11:22:33:00:00:01", -70.0, 11),
            ],
        );

        let (status, body) = send(create_router(state), scan_request()).await;

        assert_eq!(status, StatusCode::OK);
        let networks = body["networks"].as_array().unwrap();
        assert_eq!(networks.len(), 3);
        for field in ["ssid", "bssid", "mean_signal", "signal_std", "channel", "vendor", "suspicious", "confidence", "anomaly_score"] {
            assert!(networks[0].get(field).is_some(), "missing {}", field);
        }
        assert_eq!(body["stats"]["totalNetworks"], 3);
        assert_eq!(body["stats"]["avgSignal"], -55.0);
        assert_eq!(body["stats"]["avgBssidCount"], 1.5);
    }

    #[tokio::test]
    async fn test_scan_without_networks_is_500() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, Vec::new());

        let (status, body) = send(create_router(state), scan_request()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "No networks found." }));
    }

    #[tokio::test]
    async fn test_health_reports_history_rows() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, vec![obs("Home", "aa:bb:cc:00:00:01", -45.0, 6)]);
        let app = create_router(state);

        let (_, before) = send(app.clone(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(before["status"], "healthy");
        assert_eq!(before["historyRows"], 0);
        assert_eq!(before["scanner"], "replay");

        let (status, _) = send(app.clone(), scan_request()).await;
        assert_eq!(status, StatusCode::OK);

        let (_, after) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(after["historyRows"], 1);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir, Vec::new()));

        let request = Request::get("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
