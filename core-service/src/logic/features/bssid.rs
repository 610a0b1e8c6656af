//! Per-(SSID, BSSID) features over the full history (rich / HTTP variant).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::logic::scanner::{MacAddress, ScanRecord};
use super::layout::{BSSID_COLUMNS, VENDOR_PREFIX};
use super::matrix::FeatureMatrix;
use super::stats::{channel_mode, mean, sample_std};

/// Aggregate of every observation of one access point under one SSID
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BssidAggregate {
    pub ssid: String,
    pub bssid: String,
    pub signal_mean: f64,
    pub signal_std: f64,
    pub channel: u16,
    /// Vendor of the latest row for this BSSID
    pub vendor: String,
    pub samples: usize,
}

/// Group the history by (SSID, BSSID), sorted by key, and one-hot encode vendors
pub fn build_bssid_features(history: &[ScanRecord]) -> FeatureMatrix<BssidAggregate> {
    let mut groups: BTreeMap<(&str, &str), Vec<&ScanRecord>> = BTreeMap::new();
    let mut latest_vendor: HashMap<&str, &str> = HashMap::new();

    for record in history {
        groups
            .entry((record.ssid.as_str(), record.bssid.as_str()))
            .or_default()
            .push(record);
        latest_vendor.insert(record.bssid.as_str(), record.vendor.as_str());
    }

    let aggregates: Vec<BssidAggregate> = groups
        .into_iter()
        .map(|((ssid, bssid), records)| {
            let signals: Vec<f64> = records.iter().map(|r| r.signal as f64).collect();
            let channels: Vec<u16> = records.iter().map(|r| r.channel).collect();

            BssidAggregate {
                ssid: ssid.to_string(),
                bssid: bssid.to_string(),
                signal_mean: mean(&signals),
                signal_std: sample_std(&signals),
                channel: channel_mode(&channels),
                vendor: latest_vendor.get(bssid).copied().unwrap_or_default().to_string(),
                samples: records.len(),
            }
        })
        .collect();

    let vendors: Vec<&str> = aggregates
        .iter()
        .map(|a| a.vendor.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut columns: Vec<String> = BSSID_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(vendors.iter().map(|v| format!("{}{}", VENDOR_PREFIX, v)));

    let data: Vec<Vec<f64>> = aggregates
        .iter()
        .map(|a| {
            let local_admin = MacAddress::parse(&a.bssid)
                .map(|mac| mac.is_locally_administered())
                .unwrap_or(false);

            let mut row = vec![
                a.signal_mean,
                a.signal_std,
                a.channel as f64,
                a.ssid.chars().count() as f64,
                if local_admin { 1.0 } else { 0.0 },
            ];
            row.extend(vendors.iter().map(|v| if *v == a.vendor { 1.0 } else { 0.0 }));
            row
        })
        .collect();

    FeatureMatrix::from_rows(aggregates, columns, &data)
}
