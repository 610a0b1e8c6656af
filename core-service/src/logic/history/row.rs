use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::logic::scanner::{vendor_oui, MacAddress, ScanRecord};

/// One CSV line; columns absent from older logs fall back to defaults
#[derive(Debug, Deserialize)]
pub(super) struct HistoryRow {
    #[serde(rename = "SSID")]
    ssid: String,
    #[serde(rename = "BSSID")]
    bssid: String,
    #[serde(rename = "Signal")]
    signal: i32,
    #[serde(rename = "Channel", default)]
    channel: u16,
    #[serde(rename = "Vendor", default)]
    vendor: String,
    #[serde(rename = "ScannedAt", default)]
    scanned_at: Option<DateTime<Utc>>,
    #[serde(rename = "ScanId", default)]
    scan_id: Option<Uuid>,
}

impl HistoryRow {
    /// Older tools wrote BSSIDs upper-case, some with a trailing `:`; parseable
    /// ones are re-rendered the way fresh scans store them.
    pub(super) fn into_record(self) -> ScanRecord {
        let vendor = if self.vendor.is_empty() {
            vendor_oui(&self.bssid)
        } else {
            self.vendor
        };
        let bssid = MacAddress::parse(&self.bssid)
            .map(|mac| mac.to_string())
            .unwrap_or(self.bssid);

        ScanRecord {
            ssid: self.ssid,
            bssid,
            signal: self.signal,
            channel: self.channel,
            vendor,
            scanned_at: self.scanned_at,
            scan_id: self.scan_id,
        }
    }
}

/// Render one column of a record; unknown columns are left blank
pub(super) fn field(record: &ScanRecord, column: &str) -> String {
    match column {
        "SSID" => record.ssid.clone(),
        "BSSID" => record.bssid.clone(),
        "Signal" => record.signal.to_string(),
        "Channel" => record.channel.to_string(),
        "Vendor" => record.vendor.clone(),
        "ScannedAt" => record.scanned_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        "ScanId" => record.scan_id.map(|id| id.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}
