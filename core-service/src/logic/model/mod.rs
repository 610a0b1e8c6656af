//! Model Module - Anomaly Scoring Engine
//!
//! The detector sits behind `AnomalyDetector` so the forest can be swapped
//! without touching the pipeline. Every request fits a fresh model on the
//! matrix it scores.

pub mod isolation_forest;
pub mod threshold;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::logic::features::FeatureMatrix;

// Re-export common types
pub use isolation_forest::{ForestConfig, IsolationForest};
pub use threshold::{contamination_threshold, percentile, ThresholdStats};

// ============================================================================
// DETECTOR TRAIT
// ============================================================================

/// Unsupervised outlier detector over a dense feature matrix
pub trait AnomalyDetector {
    fn fit(&mut self, x: &Array2<f64>) -> Result<(), ModelError>;

    /// Higher means more anomalous
    fn score_samples(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError>;

    /// Scores strictly above this are outliers
    fn threshold(&self) -> f64;

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<bool>, ModelError> {
        let threshold = self.threshold();
        Ok(self.score_samples(x)?.iter().map(|s| *s > threshold).collect())
    }

    fn fit_predict(&mut self, x: &Array2<f64>) -> Result<Vec<bool>, ModelError> {
        self.fit(x)?;
        self.predict(x)
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Per-row verdict, in matrix row order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub is_outlier: bool,
    pub anomaly_score: f64,
    pub confidence: f64,
}

/// Fit a fresh forest on `matrix` and label every row of it
pub fn score_matrix<K>(config: &ForestConfig, matrix: &FeatureMatrix<K>) -> Result<Vec<ScoreResult>, ModelError> {
    if matrix.is_empty() {
        return Ok(Vec::new());
    }

    let mut forest = IsolationForest::new(config.clone())?;
    forest.fit_matrix(matrix)?;
    let scores = forest.score_matrix_samples(matrix)?.to_vec();
    let stats = ThresholdStats::new(&scores, forest.threshold());

    log::debug!(
        "Scored {} rows: threshold={:.4}, max_margin={:.4}, mean_score={:.4}",
        stats.sample_count,
        stats.threshold,
        stats.max_margin,
        stats.mean_score
    );

    Ok(scores
        .into_iter()
        .map(|score| ScoreResult {
            is_outlier: score > stats.threshold,
            anomaly_score: score,
            confidence: stats.confidence(score),
        })
        .collect())
}
