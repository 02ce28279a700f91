//! Per-column descriptive statistics and the degenerate-column test.
//!
//! Variance and standard deviation are population statistics (divide by n),
//! matching the conventions of the datasets this crate was built against.
use std::collections::{HashMap, HashSet};

use ndarray::ArrayView1;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::dataset::FeatureFrame;

/// Descriptive statistics for one feature column.
///
/// `mode` is absent when no value has a strictly highest frequency, which
/// is the normal case for continuous columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub mode: Option<f64>,
}

/// Summarize every feature column of a frame.
pub fn summarize(x: &FeatureFrame) -> HashMap<String, FeatureSummary> {
    let mut out = HashMap::with_capacity(x.n_features());
    for (i, name) in x.feature_names().iter().enumerate() {
        let values: Vec<f64> = x.column_at(i).iter().copied().collect();
        out.insert(name.clone(), column_summary(&values));
    }
    out
}

pub fn column_summary(values: &[f64]) -> FeatureSummary {
    let mut ordered = Data::new(values.to_vec());
    FeatureSummary {
        mean: values.iter().mean(),
        median: ordered.median(),
        std_dev: values.iter().population_std_dev(),
        variance: values.iter().population_variance(),
        mode: mode(values),
    }
}

/// Number of distinct values in a column, comparing by bit pattern.
pub fn distinct_count(values: ArrayView1<'_, f64>) -> usize {
    let mut seen = HashSet::with_capacity(values.len());
    for &v in values.iter() {
        seen.insert(v.to_bits());
    }
    seen.len()
}

/// Columns with fewer than 2 distinct values break ordinary correlation
/// statistics; every correlation guard in this crate checks this first.
pub fn is_degenerate(values: ArrayView1<'_, f64>) -> bool {
    distinct_count(values) < 2
}

fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in values {
        let entry = counts.entry(v.to_bits()).or_insert((v, 0));
        entry.1 += 1;
    }

    let mut best: Option<(f64, usize)> = None;
    let mut tied = false;
    for &(value, count) in counts.values() {
        match best {
            None => {
                best = Some((value, count));
                tied = false;
            }
            Some((_, best_count)) if count > best_count => {
                best = Some((value, count));
                tied = false;
            }
            Some((_, best_count)) if count == best_count => {
                tied = true;
            }
            _ => {}
        }
    }

    match best {
        Some((value, _)) if !tied => Some(value),
        _ => None,
    }
}
