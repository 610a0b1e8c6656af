//! Scanner Module - WiFi access point acquisition
//!
//! Platform backends sit behind [`WlanScanPort`]; [`scan_once`] turns their raw
//! output into normalised [`ScanRecord`] rows stamped with one scan id.

pub mod iw;
pub mod netsh;
pub mod replay;
pub mod types;
pub mod vendor;

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ScanError;
use super::config::SentinelConfig;

pub use iw::LinuxIwScanner;
pub use netsh::NetshScanner;
pub use replay::ReplayScanner;
pub use types::{RawObservation, ScanBatch, ScanRecord};
pub use vendor::{vendor_oui, MacAddress};

/// Port abstracting the platform scan backend
pub trait WlanScanPort: Send + Sync {
    /// Trigger one scan, wait for it to settle and return what is visible
    fn scan(&self) -> Result<Vec<RawObservation>, ScanError>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Which backend to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanBackend {
    /// netsh on Windows, iw elsewhere
    Auto,
    Iw,
    Netsh,
    Replay(PathBuf),
}

impl ScanBackend {
    pub fn from_name(name: &str, replay_file: Option<PathBuf>) -> Self {
        match (name, replay_file) {
            ("iw", _) => ScanBackend::Iw,
            ("netsh", _) => ScanBackend::Netsh,
            ("replay", Some(path)) => ScanBackend::Replay(path),
            ("replay", None) => {
                log::warn!("WIFI_SCAN_BACKEND=replay without WIFI_REPLAY_FILE, using auto");
                ScanBackend::Auto
            }
            ("auto", _) => ScanBackend::Auto,
            (other, _) => {
                log::warn!("Unknown scan backend '{}', using auto", other);
                ScanBackend::Auto
            }
        }
    }
}

/// Build the scanner selected by the configuration
pub fn create_scanner(config: &SentinelConfig) -> Box<dyn WlanScanPort> {
    match &config.backend {
        ScanBackend::Iw => Box::new(LinuxIwScanner::new(&config.interface, config.settle_delay)),
        ScanBackend::Netsh => Box::new(NetshScanner::new(config.settle_delay)),
        ScanBackend::Replay(path) => Box::new(ReplayScanner::from_file(path)),
        ScanBackend::Auto => {
            if cfg!(windows) {
                Box::new(NetshScanner::new(config.settle_delay))
            } else {
                Box::new(LinuxIwScanner::new(&config.interface, config.settle_delay))
            }
        }
    }
}

/// Convert a centre frequency in MHz to an 802.11 channel (0 = unknown)
pub fn freq_to_channel(freq_mhz: u32) -> u16 {
    match freq_mhz {
        2412..=2472 => ((freq_mhz - 2407) / 5) as u16,
        2484 => 14,
        5170..=5885 => ((freq_mhz - 5000) / 5) as u16,
        5955..=7115 => ((freq_mhz - 5950) / 5) as u16,
        _ => 0,
    }
}

/// Normalise one raw observation; hidden (empty SSID) networks yield `None`
pub fn normalize(obs: &RawObservation) -> Option<ScanRecord> {
    let ssid = obs.ssid.trim();
    if ssid.is_empty() {
        return None;
    }

    let raw_bssid = obs.bssid.trim();
    let bssid = MacAddress::parse(raw_bssid)
        .map(|mac| mac.to_string())
        .unwrap_or_else(|| raw_bssid.to_string());

    let channel = obs
        .channel
        .filter(|c| *c > 0)
        .or_else(|| obs.freq_mhz.map(freq_to_channel))
        .unwrap_or(0);

    Some(ScanRecord::new(
        ssid,
        &bssid,
        obs.signal_dbm.round() as i32,
        channel,
        &vendor_oui(raw_bssid),
    ))
}

/// Run the scanner once and normalise its output into a stamped batch
pub fn scan_once(scanner: &dyn WlanScanPort) -> Result<ScanBatch, ScanError> {
    log::info!("Starting WiFi scan via {}", scanner.name());

    let raw = scanner.scan()?;
    let scan_id = Uuid::new_v4();
    let scanned_at = Utc::now();

    let records: Vec<ScanRecord> = raw
        .iter()
        .filter_map(normalize)
        .map(|mut record| {
            record.scan_id = Some(scan_id);
            record.scanned_at = Some(scanned_at);
            record
        })
        .collect();

    log::info!(
        "Found {} networks ({} hidden or unnamed dropped)",
        records.len(),
        raw.len() - records.len()
    );

    Ok(ScanBatch {
        scan_id,
        scanned_at,
        records,
    })
}
