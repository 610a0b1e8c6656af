//! Scan data types shared by every adapter and the history log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One access point as reported by a platform backend, before normalisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Network name. Empty for hidden networks.
    #[serde(default)]
    pub ssid: String,
    /// Access point MAC as printed by the backend
    pub bssid: String,
    /// Received signal strength in dBm
    pub signal_dbm: f64,
    /// Centre frequency in MHz, when the backend reports it
    #[serde(default)]
    pub freq_mhz: Option<u32>,
    /// 802.11 channel, when the backend reports it
    #[serde(default)]
    pub channel: Option<u16>,
}

/// A normalised scan row, immutable once written to the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ssid: String,
    pub bssid: String,
    /// Signal in whole dBm
    pub signal: i32,
    /// 802.11 channel, 0 when unknown
    pub channel: u16,
    /// OUI prefix of the BSSID (`XX-XX-XX`) or `Unknown`
    pub vendor: String,
    pub scanned_at: Option<DateTime<Utc>>,
    pub scan_id: Option<Uuid>,
}

impl ScanRecord {
    /// Build a record with no scan metadata attached
    pub fn new(ssid: &str, bssid: &str, signal: i32, channel: u16, vendor: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            signal,
            channel,
            vendor: vendor.to_string(),
            scanned_at: None,
            scan_id: None,
        }
    }
}

/// Result of one scan: its id, capture time and the normalised rows
#[derive(Debug, Clone)]
pub struct ScanBatch {
    pub scan_id: Uuid,
    pub scanned_at: DateTime<Utc>,
    pub records: Vec<ScanRecord>,
}

impl ScanBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
