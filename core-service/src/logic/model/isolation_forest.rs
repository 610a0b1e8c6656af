//! Isolation Forest - unsupervised outlier detector
//!
//! Points that random axis-aligned splits isolate in few steps get high
//! scores. Sub-sampling and split choices come from a seeded RNG, so a fixed
//! seed and matrix always give the same scores.

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ModelError;
use crate::logic::features::FeatureMatrix;
use super::threshold::contamination_threshold;
use super::AnomalyDetector;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Forest parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// Upper bound on rows sampled (without replacement) per tree
    pub max_samples: usize,
    /// Expected share of outliers, in (0, 0.5]
    pub contamination: f64,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: constants::DEFAULT_MODEL_TREES,
            max_samples: constants::DEFAULT_MAX_SAMPLES,
            contamination: constants::DEFAULT_CONTAMINATION,
            seed: constants::DEFAULT_MODEL_SEED,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn fit(x: &Array2<f64>, indices: Vec<usize>, depth_limit: usize, rng: &mut StdRng) -> Self {
        Self {
            root: build_node(x, indices, 0, depth_limit, rng),
        }
    }

    /// Depth at which `sample` lands, corrected for the unbuilt subtree below the leaf
    pub fn path_length(&self, sample: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;

        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split { feature, value, left, right } => {
                    node = if sample[*feature] <= *value { left.as_ref() } else { right.as_ref() };
                    depth += 1.0;
                }
            }
        }
    }
}

fn build_node(
    x: &Array2<f64>,
    indices: Vec<usize>,
    depth: usize,
    depth_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= depth_limit || indices.len() <= 1 {
        return Node::Leaf { size: indices.len() };
    }

    // (feature, min, max) for every feature that still varies at this node
    let candidates: Vec<(usize, f64, f64)> = (0..x.ncols())
        .filter_map(|j| {
            let (min, max) = indices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
                let v = x[[i, j]];
                (lo.min(v), hi.max(v))
            });
            (max > min).then_some((j, min, max))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: indices.len() };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let value = rng.gen_range(min..max);

    let (left, right): (Vec<usize>, Vec<usize>) =
        indices.into_iter().partition(|&i| x[[i, feature]] <= value);

    Node::Split {
        feature,
        value,
        left: Box::new(build_node(x, left, depth + 1, depth_limit, rng)),
        right: Box::new(build_node(x, right, depth + 1, depth_limit, rng)),
    }
}

/// Average path length of an unsuccessful BST search over `n` points, c(n)
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

pub struct IsolationForest {
    config: ForestConfig,
    trees: Vec<IsolationTree>,
    sample_size: usize,
    n_features: usize,
    /// Column layout of the matrix passed to `fit_matrix`
    layout_hash: Option<u32>,
    threshold: f64,
    fitted: bool,
}

impl IsolationForest {
    pub fn new(config: ForestConfig) -> Result<Self, ModelError> {
        if config.n_trees == 0 {
            return Err(ModelError::InvalidParameter("n_trees must be > 0".into()));
        }
        if config.max_samples == 0 {
            return Err(ModelError::InvalidParameter("max_samples must be > 0".into()));
        }
        if !(config.contamination > 0.0 && config.contamination <= 0.5) {
            return Err(ModelError::InvalidParameter(format!(
                "contamination must be in (0, 0.5], got {}",
                config.contamination
            )));
        }

        Ok(Self {
            config,
            trees: Vec::new(),
            sample_size: 0,
            n_features: 0,
            layout_hash: None,
            threshold: 0.5,
            fitted: false,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit on a feature matrix and remember its column layout
    pub fn fit_matrix<K>(&mut self, matrix: &FeatureMatrix<K>) -> Result<(), ModelError> {
        self.fit(matrix.values())?;
        self.layout_hash = Some(matrix.layout_hash());
        Ok(())
    }

    /// Score a feature matrix; it must have the layout the model was fit on
    pub fn score_matrix_samples<K>(&self, matrix: &FeatureMatrix<K>) -> Result<Array1<f64>, ModelError> {
        if let Some(expected) = self.layout_hash {
            matrix.validate_layout(expected)?;
        }
        self.score_samples(matrix.values())
    }

    /// Isolation score of one row: 2^(-E[h(x)] / c(sample_size))
    fn score_row(&self, sample: ArrayView1<'_, f64>) -> f64 {
        let normalizer = average_path_length(self.sample_size);
        if normalizer == 0.0 || self.trees.is_empty() {
            return 0.5;
        }

        let mean_path = self.trees.iter().map(|t| t.path_length(sample)).sum::<f64>()
            / self.trees.len() as f64;

        2f64.powf(-mean_path / normalizer)
    }
}

impl AnomalyDetector for IsolationForest {
    fn fit(&mut self, x: &Array2<f64>) -> Result<(), ModelError> {
        let n = x.nrows();
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        self.sample_size = self.config.max_samples.min(n);
        self.n_features = x.ncols();
        self.layout_hash = None;
        let depth_limit = (self.sample_size.max(2) as f64).log2().ceil() as usize;

        self.trees = if n == 0 {
            Vec::new()
        } else {
            (0..self.config.n_trees)
                .map(|_| {
                    let indices = rand::seq::index::sample(&mut rng, n, self.sample_size).into_vec();
                    IsolationTree::fit(x, indices, depth_limit, &mut rng)
                })
                .collect()
        };
        self.fitted = true;

        let scores = self.score_samples(x)?;
        self.threshold = contamination_threshold(scores.as_slice().unwrap_or(&[]), self.config.contamination);

        log::debug!(
            "Isolation forest fit: rows={}, trees={}, sample_size={}, threshold={:.4}",
            n,
            self.trees.len(),
            self.sample_size,
            self.threshold
        );

        Ok(())
    }

    fn score_samples(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }
        Ok(x.rows().into_iter().map(|row| self.score_row(row)).collect())
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn forest() -> IsolationForest {
        IsolationForest::new(ForestConfig::default()).unwrap()
    }

    /// 20 points near (-50, 2) plus one far away
    fn cluster_with_outlier() -> Array2<f64> {
        let mut rows = Vec::new();
        for i in 0..20 {
            rows.push([-50.0 + (i % 5) as f64, 2.0 + (i % 3) as f64 * 0.5]);
        }
        rows.push([-95.0, 25.0]);
        Array2::from_shape_fn((rows.len(), 2), |(i, j)| rows[i][j])
    }

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) is about 10.24
        assert!((average_path_length(256) - 10.24).abs() < 0.01);
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = ForestConfig { contamination: 0.0, ..Default::default() };
        assert!(IsolationForest::new(bad).is_err());
        let bad = ForestConfig { n_trees: 0, ..Default::default() };
        assert!(IsolationForest::new(bad).is_err());
    }

    #[test]
    fn test_score_before_fit() {
        let model = forest();
        assert!(matches!(model.score_samples(&array![[1.0]]), Err(ModelError::NotFitted)));
    }

    #[test]
    fn test_outlier_scores_highest_and_is_flagged() {
        let x = cluster_with_outlier();
        let mut model = forest();
        let labels = model.fit_predict(&x).unwrap();
        let scores = model.score_samples(&x).unwrap();

        let max_idx = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_idx, 20);
        assert!(labels[20]);
        // contamination 0.1 over 21 rows flags only a couple
        assert!(labels.iter().filter(|l| **l).count() <= 3);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let x = cluster_with_outlier();

        let mut a = forest();
        a.fit(&x).unwrap();
        let mut b = forest();
        b.fit(&x).unwrap();

        assert_eq!(a.score_samples(&x).unwrap(), b.score_samples(&x).unwrap());
        assert_eq!(a.threshold(), b.threshold());
    }

    #[test]
    fn test_identical_rows_have_no_outliers() {
        let x = Array2::from_elem((10, 3), 1.0);
        let mut model = forest();
        let labels = model.fit_predict(&x).unwrap();

        assert!(labels.iter().all(|l| !l));
        let scores = model.score_samples(&x).unwrap();
        assert!(scores.iter().all(|s| (s - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_single_row_is_inlier() {
        let x = array![[-60.0, 0.0, 6.0]];
        let mut model = forest();
        let labels = model.fit_predict(&x).unwrap();

        assert_eq!(labels.len(), 1);
        assert!(!labels[0]);
        assert_eq!(model.score_samples(&x).unwrap()[0], 0.5);
    }

    #[test]
    fn test_score_with_other_feature_count() {
        let mut model = forest();
        model.fit(&cluster_with_outlier()).unwrap();

        let err = model.score_samples(&array![[1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn test_score_matrix_with_other_layout() {
        let x = cluster_with_outlier();
        let data: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
        let keys: Vec<usize> = (0..data.len()).collect();
        let columns = |names: [&str; 2]| names.iter().map(|c| c.to_string()).collect::<Vec<_>>();

        let fitted = FeatureMatrix::from_rows(keys.clone(), columns(["signal_mean", "vendor_00-11-22"]), &data);
        let other = FeatureMatrix::from_rows(keys, columns(["signal_mean", "vendor_A8-BB-CC"]), &data);

        let mut model = forest();
        model.fit_matrix(&fitted).unwrap();

        assert_eq!(model.score_matrix_samples(&fitted).unwrap().len(), data.len());
        match model.score_matrix_samples(&other) {
            Err(ModelError::LayoutMismatch(e)) => {
                assert_eq!(e.expected_hash, fitted.layout_hash());
                assert_eq!(e.actual_hash, other.layout_hash());
            }
            result => panic!("Expected LayoutMismatch, got {:?}", result.map(|s| s.len())),
        }
    }

    #[test]
    fn test_empty_matrix() {
        let x = Array2::<f64>::zeros((0, 4));
        let mut model = forest();
        assert!(model.fit_predict(&x).unwrap().is_empty());
    }
}
