//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden through an environment variable.

use std::path::PathBuf;

/// Basic history log written by the CLI scanner
pub const DEFAULT_HISTORY_FILE: &str = "wifi_scans.csv";

/// Rich history log written by the HTTP scanner
pub const DEFAULT_RICH_HISTORY_FILE: &str = "wifi_scans_rich.csv";

/// Seconds to wait between triggering a scan and reading its results
pub const DEFAULT_SCAN_SETTLE_SECS: u64 = 3;

/// Default wireless interface for the `iw` backend
pub const DEFAULT_INTERFACE: &str = "wlan0";

/// Expected share of outliers in the feature matrix
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Fixed forest seed so labels are reproducible
pub const DEFAULT_MODEL_SEED: u64 = 42;

/// Number of isolation trees
pub const DEFAULT_MODEL_TREES: usize = 100;

/// Upper bound on rows sampled per tree
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Vendor label used when a BSSID has no parseable OUI
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "WiFi Sentinel";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Base directory for history logs
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wifi-sentinel")
}

/// Get basic history path from environment or use default
pub fn get_history_file() -> PathBuf {
    std::env::var("WIFI_HISTORY_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_data_dir().join(DEFAULT_HISTORY_FILE))
}

/// Get rich history path from environment or use default
pub fn get_rich_history_file() -> PathBuf {
    std::env::var("WIFI_RICH_HISTORY_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_data_dir().join(DEFAULT_RICH_HISTORY_FILE))
}

/// Get scan backend name (`auto`, `iw`, `netsh`, `replay`)
pub fn get_scan_backend() -> String {
    std::env::var("WIFI_SCAN_BACKEND")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|_| "auto".to_string())
}

/// Get wireless interface from environment or use default
pub fn get_interface() -> String {
    std::env::var("WIFI_INTERFACE")
        .unwrap_or_else(|_| DEFAULT_INTERFACE.to_string())
}

/// Get scan settle delay from environment or use default
pub fn get_scan_settle_secs() -> u64 {
    std::env::var("WIFI_SCAN_SETTLE_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SCAN_SETTLE_SECS)
}

/// Get replay fixture path, if any
pub fn get_replay_file() -> Option<String> {
    std::env::var("WIFI_REPLAY_FILE").ok().filter(|s| !s.trim().is_empty())
}

/// Get contamination from environment or use default
pub fn get_contamination() -> f64 {
    std::env::var("WIFI_CONTAMINATION")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|c| *c > 0.0 && *c <= 0.5)
        .unwrap_or(DEFAULT_CONTAMINATION)
}

/// Get forest seed from environment or use default
pub fn get_model_seed() -> u64 {
    std::env::var("WIFI_MODEL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MODEL_SEED)
}

/// Get tree count from environment or use default
pub fn get_model_trees() -> usize {
    std::env::var("WIFI_MODEL_TREES")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MODEL_TREES)
}
