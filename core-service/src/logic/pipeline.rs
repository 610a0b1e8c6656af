//! Scan pipeline: scan -> append -> reload -> features -> score -> report.
//!
//! Both variants fit a fresh model per request on the whole history, so the
//! verdicts are relative to everything this host has seen so far.

use crate::error::{SentinelError, SentinelResult};
use crate::logic::config::SentinelConfig;
use crate::logic::features::{build_bssid_features, build_ssid_features};
use crate::logic::history::HistoryStore;
use crate::logic::model::score_matrix;
use crate::logic::report::{cli_report, rich_report, CliNetwork, RichNetwork, ScanReport};
use crate::logic::scanner::{scan_once, WlanScanPort};

/// Per-SSID variant used by the CLI.
///
/// An empty scan is not an error: it yields zero stats and writes nothing.
pub fn run_cli_scan(
    config: &SentinelConfig,
    scanner: &dyn WlanScanPort,
    store: &HistoryStore,
) -> SentinelResult<ScanReport<CliNetwork>> {
    // 1. Scan
    let batch = scan_once(scanner)?;
    if batch.is_empty() {
        log::info!("No networks visible, returning empty report");
        return Ok(ScanReport::empty());
    }

    // 2. Persist, then reload the full log (includes this scan)
    store.append(&batch.records)?;
    let history = store.load()?;

    // 3. Features + model
    let matrix = build_ssid_features(&history, &batch.records);
    log::debug!("SSID matrix: {}", matrix.to_log_entry());
    let scores = score_matrix(&config.forest, &matrix)?;

    // 4. Map back to the current scan
    let report = cli_report(&batch.records, matrix.rows(), &scores);
    log::info!(
        "Scan {} done: {} networks, {} suspicious",
        batch.scan_id,
        report.stats.total_networks,
        report.stats.suspicious_count
    );

    Ok(report)
}

/// Per-(SSID, BSSID) variant used by the HTTP endpoint.
///
/// An empty scan is an error (`No networks found.`).
pub fn run_rich_scan(
    config: &SentinelConfig,
    scanner: &dyn WlanScanPort,
    store: &HistoryStore,
) -> SentinelResult<ScanReport<RichNetwork>> {
    let batch = scan_once(scanner)?;
    if batch.is_empty() {
        return Err(SentinelError::NoNetworks);
    }

    store.append(&batch.records)?;
    let history = store.load()?;

    let matrix = build_bssid_features(&history);
    log::debug!("BSSID matrix: {}", matrix.to_log_entry());
    let scores = score_matrix(&config.forest, &matrix)?;

    let report = rich_report(&batch.records, matrix.rows(), &scores);
    log::info!(
        "Scan {} done: {} access points over {} history rows, {} suspicious",
        batch.scan_id,
        report.stats.total_networks,
        history.len(),
        report.stats.suspicious_count
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::logic::history::HistorySchema;
    use crate::logic::scanner::{RawObservation, ReplayScanner};
    use tempfile::TempDir;

    fn obs(ssid: &str, bssid: &str, signal: f64, channel: u16) -> RawObservation {
        RawObservation {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            signal_dbm: signal,
            freq_mhz: None,
            channel: Some(channel),
        }
    }

    fn neighbourhood() -> Vec<RawObservation> {
        vec![
            obs("Home", "AA:BB:CC:00:00:01", -45.0, 6),
            obs("Home", "AA:BB:CC:00:00:02", -52.0, 6),
            obs("Office", "11:22:33:00:00:01", -70.0, 36),
            obs("", "11:22:33:00:00:09", -80.0, 1),
            obs("Cafe", "44:55:66:00:00:01", -66.0, 11),
        ]
    }

    struct FailingScanner;

    impl WlanScanPort for FailingScanner {
        fn scan(&self) -> Result<Vec<RawObservation>, ScanError> {
            Err(ScanError::NoInterface)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_cli_scan_reports_current_rows() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("scans.csv"), HistorySchema::Basic);
        let scanner = ReplayScanner::fixed(neighbourhood());

        let report = run_cli_scan(&SentinelConfig::default(), &scanner, &store).unwrap();

        // Hidden network dropped
        assert_eq!(report.networks.len(), 4);
        assert_eq!(report.stats.total_networks, 4);
        assert_eq!(report.networks[0].bssid, "aa:bb:cc:00:00:01");
        // (-45 - 52 - 70 - 66) / 4 = -58.25
        assert_eq!(report.stats.avg_signal, -58.3);
        // Home: 2, Office: 1, Cafe: 1
        assert_eq!(report.stats.avg_bssid_count, 1.3);
        assert_eq!(store.row_count().unwrap(), 4);
        for n in &report.networks {
            assert!((0.5..=1.0).contains(&n.confidence));
        }
    }

    #[test]
    fn test_cli_empty_scan_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scans.csv");
        let store = HistoryStore::new(&path, HistorySchema::Basic);
        let scanner = ReplayScanner::fixed(vec![obs("", "aa:bb:cc:00:00:01", -50.0, 6)]);

        let report = run_cli_scan(&SentinelConfig::default(), &scanner, &store).unwrap();

        assert!(report.networks.is_empty());
        assert_eq!(report.stats.total_networks, 0);
        assert_eq!(report.stats.avg_signal, 0.0);
        assert!(!path.exists());
    }

    #[test]
    fn test_history_grows_across_requests() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("rich.csv"), HistorySchema::Rich);
        let scanner = ReplayScanner::fixed(neighbourhood());
        let config = SentinelConfig::default();

        run_rich_scan(&config, &scanner, &store).unwrap();
        let report = run_rich_scan(&config, &scanner, &store).unwrap();

        assert_eq!(store.row_count().unwrap(), 8);
        // Still one entry per access point
        assert_eq!(report.networks.len(), 4);
        let home = report.networks.iter().find(|n| n.bssid == "aa:bb:cc:00:00:01").unwrap();
        assert_eq!(home.mean_signal, -45.0);
        assert_eq!(home.signal_std, 0.0);
        assert_eq!(home.channel, 6);
        assert_eq!(home.vendor, "AA-BB-CC");
    }

    #[test]
    fn test_legacy_rows_group_with_fresh_scan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rich.csv");
        std::fs::write(
            &path,
            "SSID,BSSID,Signal,Channel,Vendor\n\
             Home,AA:BB:CC:00:00:01:,-47,6,AA-BB-CC\n\
             Home,AA:BB:CC:00:00:01:,-49,6,AA-BB-CC\n",
        )
        .unwrap();
        let store = HistoryStore::new(&path, HistorySchema::Rich);
        let scanner = ReplayScanner::fixed(vec![obs("Home", "aa:bb:cc:00:00:01", -45.0, 6)]);

        let report = run_rich_scan(&SentinelConfig::default(), &scanner, &store).unwrap();

        assert_eq!(report.networks.len(), 1);
        assert_eq!(report.networks[0].bssid, "aa:bb:cc:00:00:01");
        assert_eq!(report.networks[0].mean_signal, -47.0);
    }

    #[test]
    fn test_rich_scan_is_deterministic() {
        let config = SentinelConfig::default();
        let scanner = ReplayScanner::fixed(neighbourhood());

        let a_dir = TempDir::new().unwrap();
        let a = run_rich_scan(&config, &scanner, &HistoryStore::new(a_dir.path().join("h.csv"), HistorySchema::Rich)).unwrap();
        let b_dir = TempDir::new().unwrap();
        let b = run_rich_scan(&config, &scanner, &HistoryStore::new(b_dir.path().join("h.csv"), HistorySchema::Rich)).unwrap();

        assert_eq!(a.networks, b.networks);
    }

    #[test]
    fn test_rich_empty_scan_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("rich.csv"), HistorySchema::Rich);
        let scanner = ReplayScanner::fixed(Vec::new());

        let err = run_rich_scan(&SentinelConfig::default(), &scanner, &store).unwrap_err();
        assert!(matches!(err, SentinelError::NoNetworks));
        assert_eq!(err.to_string(), "No networks found.");
    }

    #[test]
    fn test_scanner_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("scans.csv"), HistorySchema::Basic);

        let err = run_cli_scan(&SentinelConfig::default(), &FailingScanner, &store).unwrap_err();
        assert!(matches!(err, SentinelError::Scan(ScanError::NoInterface)));
    }
}
