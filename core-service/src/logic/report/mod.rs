//! Report Module - JSON payloads returned to callers
//!
//! Field names are part of the wire contract consumed by the frontend:
//! network entries use snake_case, `stats` uses camelCase.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logic::features::stats::{mean, round1};
use crate::logic::features::{avg_bssid_count, BssidAggregate, SsidAggregate};
use crate::logic::model::ScoreResult;
use crate::logic::scanner::ScanRecord;

/// One network of the CLI report (per row of the current scan)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliNetwork {
    pub ssid: String,
    pub bssid: String,
    pub signal: i32,
    pub suspicious: bool,
    pub confidence: f64,
}

/// One network of the HTTP report (per SSID/BSSID group of the history)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichNetwork {
    pub ssid: String,
    pub bssid: String,
    pub mean_signal: f64,
    pub signal_std: f64,
    pub channel: u16,
    pub vendor: String,
    pub suspicious: bool,
    pub confidence: f64,
    pub anomaly_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_networks: usize,
    pub suspicious_count: usize,
    pub avg_signal: f64,
    pub avg_bssid_count: f64,
}

impl ScanStats {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Stats of the current scan; averages rounded to one decimal
    pub fn from_scan(current: &[ScanRecord], total_networks: usize, suspicious_count: usize) -> Self {
        let signals: Vec<f64> = current.iter().map(|r| r.signal as f64).collect();

        Self {
            total_networks,
            suspicious_count,
            avg_signal: round1(mean(&signals)),
            avg_bssid_count: round1(avg_bssid_count(current)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport<N> {
    pub networks: Vec<N>,
    pub stats: ScanStats,
}

impl<N> ScanReport<N> {
    pub fn empty() -> Self {
        Self {
            networks: Vec::new(),
            stats: ScanStats::zero(),
        }
    }
}

/// Error payload of the CLI: message plus an empty report
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub networks: Vec<CliNetwork>,
    pub stats: ScanStats,
}

impl ErrorReport {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            networks: Vec::new(),
            stats: ScanStats::zero(),
        }
    }
}

/// Map per-SSID verdicts back onto every row of the current scan
pub fn cli_report(current: &[ScanRecord], ssids: &[SsidAggregate], scores: &[ScoreResult]) -> ScanReport<CliNetwork> {
    let by_ssid: HashMap<&str, &ScoreResult> = ssids
        .iter()
        .zip(scores)
        .map(|(row, score)| (row.ssid.as_str(), score))
        .collect();

    let networks: Vec<CliNetwork> = current
        .iter()
        .map(|record| {
            let verdict = by_ssid.get(record.ssid.as_str());
            CliNetwork {
                ssid: record.ssid.clone(),
                bssid: record.bssid.clone(),
                signal: record.signal,
                suspicious: verdict.map(|v| v.is_outlier).unwrap_or(false),
                confidence: verdict.map(|v| v.confidence).unwrap_or(0.5),
            }
        })
        .collect();

    let suspicious = networks.iter().filter(|n| n.suspicious).count();
    let stats = ScanStats::from_scan(current, networks.len(), suspicious);

    ScanReport { networks, stats }
}

/// One entry per (SSID, BSSID) aggregate, stats from the current scan
pub fn rich_report(current: &[ScanRecord], aggregates: &[BssidAggregate], scores: &[ScoreResult]) -> ScanReport<RichNetwork> {
    let networks: Vec<RichNetwork> = aggregates
        .iter()
        .zip(scores)
        .map(|(agg, score)| RichNetwork {
            ssid: agg.ssid.clone(),
            bssid: agg.bssid.clone(),
            mean_signal: agg.signal_mean,
            signal_std: agg.signal_std,
            channel: agg.channel,
            vendor: agg.vendor.clone(),
            suspicious: score.is_outlier,
            confidence: score.confidence,
            anomaly_score: score.anomaly_score,
        })
        .collect();

    let suspicious = networks.iter().filter(|n| n.suspicious).count();
    let stats = ScanStats::from_scan(current, networks.len(), suspicious);

    ScanReport { networks, stats }
}
