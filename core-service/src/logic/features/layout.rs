//! Feature Layout - column naming and layout hashing
//!
//! Column sets are built per request (vendor one-hot columns depend on the
//! history), so the layout is identified by a CRC32 over the ordered names.
//!
//! ## Rules:
//! 1. Add/remove/reorder a fixed column → increment FEATURE_VERSION
//! 2. Dynamic vendor columns are covered by the hash, not the version

use crc32fast::Hasher;

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Fixed columns of the per-(SSID, BSSID) matrix, before vendor columns
pub const BSSID_COLUMNS: &[&str] = &[
    "signal_mean", // mean signal (dBm)
    "signal_std",  // sample std, 0 with one sample
    "channel",     // most frequent known channel
    "ssid_len",    // SSID length in characters
    "local_admin", // 1 if the BSSID is locally administered
];

/// Columns of the per-SSID matrix
pub const SSID_COLUMNS: &[&str] = &[
    "hist_bssid_count",
    "hist_avg_signal",
    "curr_bssid_count",
    "curr_avg_signal",
];

/// Prefix of vendor one-hot columns
pub const VENDOR_PREFIX: &str = "vendor_";

/// CRC32 of the version and the ordered column names
pub fn layout_hash(columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Error when a matrix does not match the layout a model was fit on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_hash: u32,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected hash {:08x}, got {:08x}",
            self.expected_hash, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}
