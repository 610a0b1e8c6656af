//! Replay adapter: serves observations recorded in a JSON file.
//!
//! Lets the pipeline run on hosts without a WLAN radio (CI, containers).

use std::fs;
use std::path::PathBuf;

use crate::error::ScanError;
use super::types::RawObservation;
use super::WlanScanPort;

pub struct ReplayScanner {
    source: ReplaySource,
}

enum ReplaySource {
    File(PathBuf),
    Fixed(Vec<RawObservation>),
}

impl ReplayScanner {
    /// Read the observation array from `path` on every scan
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ReplaySource::File(path.into()),
        }
    }

    /// Serve the same in-memory observations on every scan
    pub fn fixed(observations: Vec<RawObservation>) -> Self {
        Self {
            source: ReplaySource::Fixed(observations),
        }
    }
}

impl WlanScanPort for ReplayScanner {
    fn scan(&self) -> Result<Vec<RawObservation>, ScanError> {
        match &self.source {
            ReplaySource::Fixed(observations) => Ok(observations.clone()),
            ReplaySource::File(path) => {
                let data = fs::read_to_string(path).map_err(|e| ScanError::Process {
                    command: format!("read {}", path.display()),
                    reason: e.to_string(),
                })?;
                serde_json::from_str(&data).map_err(|e| ScanError::Parse(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
