//! WiFi Sentinel - CLI entry point
//!
//! Scans once, prints the JSON report on stdout. Failures print an error
//! payload on stderr and exit with status 1. Logs go to stderr.

use std::process;

use wifi_sentinel_core::constants::{APP_NAME, APP_VERSION};
use wifi_sentinel_core::{
    create_scanner, run_cli_scan, CliNetwork, ErrorReport, HistorySchema, HistoryStore, ScanReport, SentinelConfig,
    SentinelResult,
};

/// What one run prints, and where
#[derive(Debug)]
enum Outcome {
    /// JSON report for stdout
    Report(String),
    /// JSON error payload for stderr
    Failure(String),
}

impl Outcome {
    fn from_result(result: SentinelResult<ScanReport<CliNetwork>>) -> Self {
        let rendered = result.and_then(|report| Ok(serde_json::to_string_pretty(&report)?));

        match rendered {
            Ok(json) => Outcome::Report(json),
            Err(e) => {
                log::error!("Scan failed: {}", e);
                let payload = serde_json::to_string_pretty(&ErrorReport::new(&e))
                    .unwrap_or_else(|_| format!("{{\"error\": {:?}}}", e.to_string()));
                Outcome::Failure(payload)
            }
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Outcome::Report(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }
}

fn run() -> SentinelResult<ScanReport<CliNetwork>> {
    let config = SentinelConfig::from_env();
    log::debug!("Config: {:?}", config);

    let scanner = create_scanner(&config);
    let store = HistoryStore::new(&config.history_file, HistorySchema::Basic);

    run_cli_scan(&config, scanner.as_ref(), &store)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting {} v{} (CLI)", APP_NAME, APP_VERSION);

    let outcome = Outcome::from_result(run());
    match &outcome {
        Outcome::Report(json) => println!("{}", json),
        Outcome::Failure(payload) => eprintln!("{}", payload),
    }

    if outcome.exit_code() != 0 {
        process::exit(outcome.exit_code());
    }
}
