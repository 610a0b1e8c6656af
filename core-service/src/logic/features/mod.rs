//! Features Module - Feature Extraction Engine
//!
//! Turns the scan history into a numeric matrix for the anomaly model.
//! Builders are pure functions of their input: same rows in, same matrix out.

pub mod bssid;
pub mod layout;
pub mod matrix;
pub mod ssid;
pub mod stats;

#[cfg(test)]
mod tests;

// Re-export common types
pub use bssid::{build_bssid_features, BssidAggregate};
pub use layout::{layout_hash, LayoutMismatchError, FEATURE_VERSION};
pub use matrix::FeatureMatrix;
pub use ssid::{avg_bssid_count, build_ssid_features, SsidAggregate};
