//! Linux adapter: `iw dev <iface> scan trigger`, settle, `iw dev <iface> scan dump`.
//!
//! Triggering a fresh scan needs `CAP_NET_ADMIN`. When the trigger is refused
//! the adapter still reads the cached results the driver holds.

use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::error::ScanError;
use super::types::RawObservation;
use super::WlanScanPort;

pub struct LinuxIwScanner {
    interface: String,
    settle_delay: Duration,
}

impl LinuxIwScanner {
    pub fn new(interface: impl Into<String>, settle_delay: Duration) -> Self {
        Self {
            interface: interface.into(),
            settle_delay,
        }
    }

    fn run_iw(&self, args: &[&str]) -> Result<String, ScanError> {
        let output = Command::new("iw")
            .args(args)
            .output()
            .map_err(|e| ScanError::Process {
                command: format!("iw {}", args.join(" ")),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_iw_failure(output.status.to_string(), stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl WlanScanPort for LinuxIwScanner {
    fn scan(&self) -> Result<Vec<RawObservation>, ScanError> {
        let iface = self.interface.as_str();

        match self.run_iw(&["dev", iface, "scan", "trigger"]) {
            Ok(_) => {}
            // Busy means a scan is already running; cached results follow.
            Err(ScanError::Failed(reason)) if is_soft_trigger_failure(&reason) => {
                log::warn!("iw scan trigger on {} refused ({}), reading cached results", iface, reason);
            }
            Err(e) => return Err(e),
        }

        thread::sleep(self.settle_delay);

        let dump = self.run_iw(&["dev", iface, "scan", "dump"])?;
        Ok(parse_iw_scan_output(&dump))
    }

    fn name(&self) -> &'static str {
        "iw"
    }
}

fn classify_iw_failure(status: String, stderr: &str) -> ScanError {
    if stderr.contains("No such device") || stderr.contains("(-19)") {
        ScanError::NoInterface
    } else {
        ScanError::Failed(format!("iw exited with {}: {}", status, stderr))
    }
}

fn is_soft_trigger_failure(reason: &str) -> bool {
    reason.contains("(-16)") || reason.contains("(-1)") || reason.contains("busy")
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Default)]
struct BssStanza {
    bssid: Option<String>,
    ssid: Option<String>,
    signal_dbm: Option<f64>,
    freq_mhz: Option<u32>,
    channel: Option<u16>,
}

impl BssStanza {
    fn flush(self) -> Option<RawObservation> {
        Some(RawObservation {
            bssid: self.bssid?,
            ssid: self.ssid.unwrap_or_default(),
            signal_dbm: self.signal_dbm.unwrap_or(-90.0),
            freq_mhz: self.freq_mhz,
            channel: self.channel,
        })
    }
}

/// Parse `iw dev <iface> scan [dump]` output.
///
/// Each BSS stanza starts at column 0 with `BSS aa:bb:cc:dd:ee:ff(on wlan0)`
/// and continues with indented `key: value` lines.
pub fn parse_iw_scan_output(output: &str) -> Vec<RawObservation> {
    let mut results = Vec::new();
    let mut current: Option<BssStanza> = None;

    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("BSS ") {
            if let Some(obs) = current.take().and_then(BssStanza::flush) {
                results.push(obs);
            }

            let mac_end = rest
                .find(|c: char| !c.is_ascii_hexdigit() && c != ':')
                .unwrap_or(rest.len());
            let mac = &rest[..mac_end];

            if mac.len() == 17 {
                current = Some(BssStanza {
                    bssid: Some(mac.to_lowercase()),
                    ..Default::default()
                });
            }
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };

        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("SSID:") {
            stanza.ssid = Some(rest.trim().to_owned());
        } else if let Some(rest) = trimmed.strip_prefix("signal:") {
            stanza.signal_dbm = rest.split_whitespace().next().and_then(|v| v.parse().ok());
        } else if let Some(rest) = trimmed.strip_prefix("freq:") {
            // Newer iw prints fractional MHz ("freq: 2437.0").
            stanza.freq_mhz = rest
                .trim()
                .split('.')
                .next()
                .and_then(|v| v.parse().ok());
        } else if let Some(rest) = trimmed.strip_prefix("DS Parameter set: channel") {
            stanza.channel = rest.trim().parse().ok();
        }
    }

    if let Some(obs) = current.take().and_then(BssStanza::flush) {
        results.push(obs);
    }

    results
}
