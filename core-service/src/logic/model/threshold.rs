//! Contamination Threshold
//!
//! Turns raw isolation scores into labels and a boundary-distance confidence.

use serde::{Deserialize, Serialize};

/// Linear-interpolated percentile (`q` in 0..=100) of unsorted values
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Score above which a row is an outlier: the (1 - contamination) quantile
pub fn contamination_threshold(scores: &[f64], contamination: f64) -> f64 {
    if scores.is_empty() {
        return 0.5;
    }
    percentile(scores, 100.0 * (1.0 - contamination))
}

/// Distance-to-boundary summary over one scored matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdStats {
    pub threshold: f64,
    pub max_margin: f64,
    pub mean_score: f64,
    pub sample_count: usize,
}

impl ThresholdStats {
    pub fn new(scores: &[f64], threshold: f64) -> Self {
        let max_margin = scores
            .iter()
            .map(|s| (s - threshold).abs())
            .fold(0.0, f64::max);
        let mean_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            threshold,
            max_margin,
            mean_score,
            sample_count: scores.len(),
        }
    }

    /// 0.5 on the boundary, 1.0 for the row farthest from it
    pub fn confidence(&self, score: f64) -> f64 {
        if self.max_margin <= f64::EPSILON {
            return 0.5;
        }
        (0.5 + 0.5 * (score - self.threshold).abs() / self.max_margin).clamp(0.5, 1.0)
    }
}
