//! Runtime configuration for the scan pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants;
use super::model::ForestConfig;
use super::scanner::ScanBackend;

/// Everything one scan request needs to know
#[derive(Debug, Clone)]
pub struct SentinelConfig {
    /// Scanner backend selection
    pub backend: ScanBackend,

    /// Wireless interface (iw backend only)
    pub interface: String,

    /// Delay between scan trigger and result read
    pub settle_delay: Duration,

    /// Basic history log (CLI)
    pub history_file: PathBuf,

    /// Rich history log (HTTP)
    pub rich_history_file: PathBuf,

    /// Isolation forest parameters
    pub forest: ForestConfig,
}

impl SentinelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let backend = ScanBackend::from_name(
            &constants::get_scan_backend(),
            constants::get_replay_file().map(PathBuf::from),
        );

        Self {
            backend,
            interface: constants::get_interface(),
            settle_delay: Duration::from_secs(constants::get_scan_settle_secs()),
            history_file: constants::get_history_file(),
            rich_history_file: constants::get_rich_history_file(),
            forest: ForestConfig {
                n_trees: constants::get_model_trees(),
                max_samples: constants::DEFAULT_MAX_SAMPLES,
                contamination: constants::get_contamination(),
                seed: constants::get_model_seed(),
            },
        }
    }
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            backend: ScanBackend::Auto,
            interface: constants::DEFAULT_INTERFACE.to_string(),
            settle_delay: Duration::from_secs(constants::DEFAULT_SCAN_SETTLE_SECS),
            history_file: constants::get_data_dir().join(constants::DEFAULT_HISTORY_FILE),
            rich_history_file: constants::get_data_dir().join(constants::DEFAULT_RICH_HISTORY_FILE),
            forest: ForestConfig::default(),
        }
    }
}
