//! WiFi Sentinel core: scan, history log, features and anomaly scoring.
//!
//! Shared by the `wifi-scan` CLI and the HTTP API server.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{HistoryError, ModelError, ScanError, SentinelError, SentinelResult};
pub use logic::config::SentinelConfig;
pub use logic::history::{HistorySchema, HistoryStore};
pub use logic::pipeline::{run_cli_scan, run_rich_scan};
pub use logic::report::{CliNetwork, ErrorReport, RichNetwork, ScanReport, ScanStats};
pub use logic::scanner::{create_scanner, WlanScanPort};
