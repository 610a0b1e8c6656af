//! Integration Tests for the feature builders

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{
        avg_bssid_count, build_bssid_features, build_ssid_features,
        layout::{BSSID_COLUMNS, SSID_COLUMNS},
    };
    use crate::logic::scanner::ScanRecord;

    fn rec(ssid: &str, bssid: &str, signal: i32, channel: u16, vendor: &str) -> ScanRecord {
        ScanRecord::new(ssid, bssid, signal, channel, vendor)
    }

    fn history() -> Vec<ScanRecord> {
        vec![
            rec("Home", "a8:bb:cc:00:00:01", -40, 6, "A8-BB-CC"),
            rec("Home", "a8:bb:cc:00:00:01", -50, 6, "A8-BB-CC"),
            rec("Cafe", "11:22:33:00:00:01", -70, 36, "11-22-33"),
            rec("Home", "02:00:00:00:00:09", -80, 11, "02-00-00"),
            rec("Home", "a8:bb:cc:00:00:01", -60, 1, "A8-BB-CC"),
        ]
    }

    /// Groups are sorted by (SSID, BSSID) and aggregated correctly
    #[test]
    fn test_bssid_grouping() {
        let matrix = build_bssid_features(&history());
        let rows = matrix.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].ssid.as_str(), rows[0].bssid.as_str()), ("Cafe", "11:22:33:00:00:01"));
        assert_eq!((rows[1].ssid.as_str(), rows[1].bssid.as_str()), ("Home", "02:00:00:00:00:09"));
        assert_eq!((rows[2].ssid.as_str(), rows[2].bssid.as_str()), ("Home", "a8:bb:cc:00:00:01"));

        let home = &rows[2];
        assert_eq!(home.samples, 3);
        assert_eq!(home.signal_mean, -50.0);
        assert_eq!(home.signal_std, 10.0);
        assert_eq!(home.channel, 6);

        // Single sample: std is 0, not NaN
        assert_eq!(rows[0].signal_std, 0.0);
    }

    /// Vendor one-hot columns follow the fixed ones in sorted order
    #[test]
    fn test_bssid_columns_and_one_hot() {
        let matrix = build_bssid_features(&history());

        let columns = matrix.columns();
        assert_eq!(&columns[..BSSID_COLUMNS.len()], BSSID_COLUMNS);
        assert_eq!(
            &columns[BSSID_COLUMNS.len()..],
            &["vendor_02-00-00", "vendor_11-22-33", "vendor_A8-BB-CC"]
        );

        assert_eq!(matrix.get(0, "vendor_11-22-33"), Some(1.0));
        assert_eq!(matrix.get(0, "vendor_A8-BB-CC"), Some(0.0));
        assert_eq!(matrix.get(1, "local_admin"), Some(1.0));
        assert_eq!(matrix.get(2, "local_admin"), Some(0.0));
        assert_eq!(matrix.get(2, "ssid_len"), Some(4.0));

        for i in 0..matrix.len() {
            let one_hot: f64 = matrix.row_values(i).iter().skip(BSSID_COLUMNS.len()).sum();
            assert_eq!(one_hot, 1.0);
        }
    }

    /// Vendor comes from the latest row of the BSSID
    #[test]
    fn test_latest_vendor_wins() {
        let mut rows = history();
        rows.push(rec("Home", "a8:bb:cc:00:00:01", -55, 6, "Unknown"));

        let matrix = build_bssid_features(&rows);
        assert_eq!(matrix.rows()[2].vendor, "Unknown");
        assert!(matrix.columns().iter().all(|c| c != "vendor_A8-BB-CC"));
    }

    /// Same input, same matrix
    #[test]
    fn test_bssid_deterministic() {
        let a = build_bssid_features(&history());
        let b = build_bssid_features(&history());

        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.values(), b.values());
        assert_eq!(a.layout_hash(), b.layout_hash());
    }

    /// Outer join fills the missing side with zeros
    #[test]
    fn test_ssid_outer_join() {
        let current = vec![
            rec("Home", "a8:bb:cc:00:00:01", -45, 6, "A8-BB-CC"),
            rec("Home", "a8:bb:cc:00:00:02", -55, 6, "A8-BB-CC"),
            rec("NewNet", "de:ad:be:ef:00:01", -65, 1, "DE-AD-BE"),
        ];
        let matrix = build_ssid_features(&history(), &current);

        assert_eq!(matrix.columns(), SSID_COLUMNS);
        let rows = matrix.rows();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].ssid, "Cafe");
        assert_eq!(rows[0].hist_bssid_count, 1);
        assert_eq!(rows[0].curr_bssid_count, 0);
        assert_eq!(rows[0].curr_avg_signal, 0.0);

        assert_eq!(rows[1].ssid, "Home");
        assert_eq!(rows[1].hist_bssid_count, 2);
        assert_eq!(rows[1].hist_avg_signal, -57.5);
        assert_eq!(rows[1].curr_bssid_count, 2);
        assert_eq!(rows[1].curr_avg_signal, -50.0);

        assert_eq!(rows[2].ssid, "NewNet");
        assert_eq!(rows[2].hist_bssid_count, 0);
        assert_eq!(rows[2].hist_avg_signal, 0.0);
        assert_eq!(matrix.get(2, "curr_avg_signal"), Some(-65.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_bssid_features(&[]).is_empty());
        assert!(build_ssid_features(&[], &[]).is_empty());
        assert_eq!(avg_bssid_count(&[]), 0.0);
    }

    #[test]
    fn test_avg_bssid_count() {
        // Home: 2 BSSIDs, Cafe: 1 -> 1.5
        let current = vec![
            rec("Home", "a8:bb:cc:00:00:01", -45, 6, "A8-BB-CC"),
            rec("Home", "a8:bb:cc:00:00:02", -55, 6, "A8-BB-CC"),
            rec("Home", "a8:bb:cc:00:00:02", -56, 6, "A8-BB-CC"),
            rec("Cafe", "11:22:33:00:00:01", -70, 36, "11-22-33"),
        ];
        assert_eq!(avg_bssid_count(&current), 1.5);
    }
}
