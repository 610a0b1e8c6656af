//! Windows adapter: `netsh wlan show networks mode=bssid`.
//!
//! netsh has no explicit trigger; the WLAN service rescans in the background,
//! so the adapter waits the settle delay and then reads the cached list.

use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::error::ScanError;
use super::types::RawObservation;
use super::WlanScanPort;

pub struct NetshScanner {
    settle_delay: Duration,
}

impl NetshScanner {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }
}

impl WlanScanPort for NetshScanner {
    fn scan(&self) -> Result<Vec<RawObservation>, ScanError> {
        thread::sleep(self.settle_delay);

        let output = Command::new("netsh")
            .args(["wlan", "show", "networks", "mode=bssid"])
            .output()
            .map_err(|e| ScanError::Process {
                command: "netsh wlan show networks mode=bssid".to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            if stdout.contains("There is no wireless interface") {
                return Err(ScanError::NoInterface);
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Failed(format!(
                "netsh exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_netsh_output(&stdout))
    }

    fn name(&self) -> &'static str {
        "netsh"
    }
}

/// netsh reports signal quality in percent
pub fn pct_to_dbm(pct: f64) -> f64 {
    (pct / 2.0) - 100.0
}

#[derive(Default)]
struct BssidBlock {
    mac: Option<String>,
    signal_pct: Option<f64>,
    channel: Option<u16>,
}

impl BssidBlock {
    fn into_observation(self, ssid: &str) -> Option<RawObservation> {
        Some(RawObservation {
            ssid: ssid.to_owned(),
            bssid: self.mac?,
            signal_dbm: pct_to_dbm(self.signal_pct.unwrap_or(0.0)),
            freq_mhz: None,
            channel: self.channel,
        })
    }
}

/// Parse `netsh wlan show networks mode=bssid` output.
///
/// ```text
/// SSID 1 : MyNetwork
///     BSSID 1                 : aa:bb:cc:dd:ee:ff
///          Signal             : 84%
///          Channel            : 36
/// ```
pub fn parse_netsh_output(output: &str) -> Vec<RawObservation> {
    let mut results = Vec::new();
    let mut current_ssid = String::new();
    let mut current_block: Option<BssidBlock> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        let Some((key, value)) = split_kv(trimmed) else {
            continue;
        };
        let key = key.to_ascii_uppercase();

        if key.starts_with("SSID") {
            if let Some(obs) = current_block.take().and_then(|b| b.into_observation(&current_ssid)) {
                results.push(obs);
            }
            current_ssid = value.to_owned();
        } else if key.starts_with("BSSID") {
            if let Some(obs) = current_block.take().and_then(|b| b.into_observation(&current_ssid)) {
                results.push(obs);
            }
            current_block = Some(BssidBlock {
                mac: Some(value.to_owned()),
                ..Default::default()
            });
        } else if let Some(block) = current_block.as_mut() {
            if key.starts_with("SIGNAL") {
                block.signal_pct = value.trim_end_matches('%').trim().parse().ok();
            } else if key.starts_with("CHANNEL") {
                block.channel = value.parse().ok();
            }
        }
    }

    if let Some(obs) = current_block.take().and_then(|b| b.into_observation(&current_ssid)) {
        results.push(obs);
    }

    results
}

/// Split on the first `" : "` so colons inside MACs and SSIDs survive
fn split_kv(line: &str) -> Option<(&str, &str)> {
    if let Some(idx) = line.find(" : ") {
        return Some((line[..idx].trim(), line[idx + 3..].trim()));
    }
    line.strip_suffix(" :").map(|key| (key.trim(), ""))
}
