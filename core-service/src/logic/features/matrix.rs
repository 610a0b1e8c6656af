//! Feature Matrix - dense numeric input for the anomaly model
//!
//! Each matrix row is paired with the aggregate it was computed from, so
//! labels can be mapped back to networks without re-grouping.

use ndarray::{Array2, ArrayView1};
use serde_json::json;

use super::layout::{layout_hash, LayoutMismatchError};

#[derive(Debug, Clone)]
pub struct FeatureMatrix<K> {
    rows: Vec<K>,
    columns: Vec<String>,
    values: Array2<f64>,
    layout_hash: u32,
}

impl<K> FeatureMatrix<K> {
    /// Build from per-row value vectors; every vector must have `columns.len()` entries
    pub fn from_rows(rows: Vec<K>, columns: Vec<String>, data: &[Vec<f64>]) -> Self {
        debug_assert_eq!(rows.len(), data.len());
        debug_assert!(data.iter().all(|r| r.len() == columns.len()));

        let values = Array2::from_shape_fn((data.len(), columns.len()), |(i, j)| data[i][j]);
        let layout_hash = layout_hash(&columns);

        Self {
            rows,
            columns,
            values,
            layout_hash,
        }
    }

    pub fn rows(&self) -> &[K] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<K> {
        self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column values for one row
    pub fn row_values(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    /// Value by row index and column name
    pub fn get(&self, index: usize, column: &str) -> Option<f64> {
        let j = self.columns.iter().position(|c| c == column)?;
        self.values.get((index, j)).copied()
    }

    /// Check a layout hash recorded elsewhere (e.g. at model fit time)
    pub fn validate_layout(&self, expected_hash: u32) -> Result<(), LayoutMismatchError> {
        if self.layout_hash == expected_hash {
            Ok(())
        } else {
            Err(LayoutMismatchError {
                expected_hash,
                actual_hash: self.layout_hash,
            })
        }
    }

    /// Compact JSON summary for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        json!({
            "rows": self.rows.len(),
            "columns": self.columns,
            "layout_hash": format!("{:08x}", self.layout_hash),
        })
    }
}
