//! Data structures for row-aligned tabular inputs.
//!
//! This module defines `FeatureFrame` (an ordered feature-name -> column
//! mapping) and `TargetColumn`, the two inputs every scorer and selector in
//! this crate reads. Frames are never mutated by the selection core; column
//! sub-selection produces owned copies.
use std::collections::HashMap;

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::FrameError;

/// An ordered mapping from feature name to a numeric column.
///
/// All columns share the same row count and row alignment (row i is the
/// same observation across columns). Feature names are unique; iteration
/// and scoring order always follow the construction order.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    names: Vec<String>,
    index: HashMap<String, usize>,
    data: Array2<f64>,
}

impl FeatureFrame {
    /// Build a frame from column names and a (rows x columns) matrix.
    pub fn new(names: Vec<String>, data: Array2<f64>) -> Result<Self, FrameError> {
        if names.len() != data.ncols() {
            return Err(FrameError::ColumnCountMismatch {
                names: names.len(),
                columns: data.ncols(),
            });
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(FrameError::DuplicateFeature(name.clone()));
            }
        }
        Ok(FeatureFrame { names, index, data })
    }

    /// Build a frame from named columns, validating row alignment.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, FrameError> {
        let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let n_cols = columns.len();
        let mut names = Vec::with_capacity(n_cols);
        let mut flat = vec![0.0; n_rows * n_cols];
        for (c, (name, values)) in columns.iter().enumerate() {
            if values.len() != n_rows {
                return Err(FrameError::RowCountMismatch {
                    feature: name.clone(),
                    expected: n_rows,
                    found: values.len(),
                });
            }
            names.push(name.clone());
            for (r, v) in values.iter().enumerate() {
                flat[r * n_cols + c] = *v;
            }
        }
        let data = Array2::from_shape_vec((n_rows, n_cols), flat)
            .expect("from_columns: shape mismatch");
        Self::new(names, data)
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column view by feature name.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.index.get(name).map(|&i| self.data.column(i))
    }

    /// Column view by position.
    pub fn column_at(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.data.column(idx)
    }

    /// The full (rows x columns) matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.data
    }

    /// Owned sub-frame containing the requested features, in request order.
    pub fn select(&self, features: &[String]) -> Result<FeatureFrame, FrameError> {
        let mut indices = Vec::with_capacity(features.len());
        for name in features {
            let Some(&i) = self.index.get(name) else {
                return Err(FrameError::UnknownFeature(name.clone()));
            };
            indices.push(i);
        }
        let data = self.data.select(Axis(1), &indices);
        FeatureFrame::new(features.to_vec(), data)
    }
}

/// A single named numeric column, row-aligned with a `FeatureFrame`.
#[derive(Debug, Clone)]
pub struct TargetColumn {
    name: String,
    values: Array1<f64>,
}

impl TargetColumn {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        TargetColumn {
            name: name.into(),
            values: Array1::from_vec(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }
}
