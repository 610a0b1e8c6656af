//! Logic Module - Scan pipeline & engines
//!
//! ## Layout
//! - `scanner/` - Platform scan backends (iw, netsh, replay) and normalisation
//! - `history/` - Append-only CSV scan log
//! - `features/` - Feature matrices (per SSID, per SSID/BSSID)
//! - `model/` - Isolation forest and thresholding
//! - `report/` - JSON payloads
//! - `pipeline` - Wires the above into one request

pub mod config;
pub mod pipeline;

pub mod features;
pub mod history;
pub mod model;
pub mod report;
pub mod scanner;
