//! Per-SSID features: whole history joined with the current scan (CLI variant).

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::logic::scanner::ScanRecord;
use super::layout::SSID_COLUMNS;
use super::matrix::FeatureMatrix;
use super::stats::mean;

/// Historical and current BSSID diversity / signal for one SSID.
///
/// An SSID missing from one side of the join carries zeros there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SsidAggregate {
    pub ssid: String,
    pub hist_bssid_count: usize,
    pub hist_avg_signal: f64,
    pub curr_bssid_count: usize,
    pub curr_avg_signal: f64,
}

/// (distinct BSSIDs, mean signal) per SSID
fn summarize(records: &[ScanRecord]) -> BTreeMap<&str, (usize, f64)> {
    let mut grouped: BTreeMap<&str, (HashSet<&str>, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let entry = grouped.entry(record.ssid.as_str()).or_default();
        entry.0.insert(record.bssid.as_str());
        entry.1.push(record.signal as f64);
    }

    grouped
        .into_iter()
        .map(|(ssid, (bssids, signals))| (ssid, (bssids.len(), mean(&signals))))
        .collect()
}

/// Outer join of history and current-scan summaries, sorted by SSID
pub fn build_ssid_features(history: &[ScanRecord], current: &[ScanRecord]) -> FeatureMatrix<SsidAggregate> {
    let mut joined: BTreeMap<String, SsidAggregate> = BTreeMap::new();

    for (ssid, (count, avg)) in summarize(history) {
        let row = joined.entry(ssid.to_string()).or_default();
        row.hist_bssid_count = count;
        row.hist_avg_signal = avg;
    }

    for (ssid, (count, avg)) in summarize(current) {
        let row = joined.entry(ssid.to_string()).or_default();
        row.curr_bssid_count = count;
        row.curr_avg_signal = avg;
    }

    let aggregates: Vec<SsidAggregate> = joined
        .into_iter()
        .map(|(ssid, mut row)| {
            row.ssid = ssid;
            row
        })
        .collect();

    let data: Vec<Vec<f64>> = aggregates
        .iter()
        .map(|a| {
            vec![
                a.hist_bssid_count as f64,
                a.hist_avg_signal,
                a.curr_bssid_count as f64,
                a.curr_avg_signal,
            ]
        })
        .collect();

    let columns = SSID_COLUMNS.iter().map(|c| c.to_string()).collect();
    FeatureMatrix::from_rows(aggregates, columns, &data)
}

/// Mean number of distinct BSSIDs per SSID in one scan, 0 when empty
pub fn avg_bssid_count(records: &[ScanRecord]) -> f64 {
    let summary = summarize(records);
    if summary.is_empty() {
        return 0.0;
    }
    summary.values().map(|(count, _)| *count as f64).sum::<f64>() / summary.len() as f64
}
