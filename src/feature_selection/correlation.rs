//! Correlation and univariate relevance scoring.
//!
//! Every statistic here is guarded against degenerate columns (fewer than
//! 2 distinct values): instead of letting Pearson or the regression F-test
//! produce NaN, the guard substitutes a fixed correlation floor, so callers
//! always receive finite numbers.

use ndarray::{Array1, ArrayView1};
use ndarray_stats::QuantileExt;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use statrs::statistics::Statistics;

use crate::dataset::{FeatureFrame, TargetColumn};
use crate::feature_selection::FeatureScore;
use crate::stats;

/// Sentinel substituted for any correlation or F-statistic computed on a
/// column with fewer than 2 distinct values. Constant columns are treated
/// as negligibly correlated rather than undefined.
pub const CORRELATION_FLOOR: f64 = 1e-10;

/// Pearson correlation coefficient between two equal-length columns.
///
/// No degeneracy guard; callers that may pass constant columns should use
/// `pair_correlation` instead.
pub fn pearson(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "Pearson correlation requires columns of equal length"
    );
    let mean_a = a.iter().mean();
    let mean_b = b.iter().mean();

    let mut num = 0.0;
    let mut den_a = 0.0;
    let mut den_b = 0.0;
    for (va, vb) in a.iter().zip(b.iter()) {
        let da = va - mean_a;
        let db = vb - mean_b;
        num += da * db;
        den_a += da * da;
        den_b += db * db;
    }

    let den = (den_a * den_b).sqrt();
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Pearson correlation with the degenerate-column guard applied.
///
/// Returns the correlation floor when either column has fewer than 2
/// distinct values, never NaN.
pub fn pair_correlation(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if stats::is_degenerate(a) || stats::is_degenerate(b) {
        return CORRELATION_FLOOR;
    }
    pearson(a, b)
}

/// Absolute pairwise correlations for every ordered column pair of a frame,
/// flattened row-major (outer loop i, inner loop j, i = j included).
///
/// Self-pairs contribute 1.0, or the correlation floor for degenerate
/// columns. The mean of this sequence is the redundancy term of the mRMR
/// objective.
pub fn self_correlation(x: &FeatureFrame) -> Vec<f64> {
    let s = x.n_features();
    let degenerate: Vec<bool> = (0..s).map(|i| stats::is_degenerate(x.column_at(i))).collect();

    let mut correlations = Vec::with_capacity(s * s);
    for i in 0..s {
        for j in 0..s {
            let value = if degenerate[i] || degenerate[j] {
                CORRELATION_FLOOR
            } else if i == j {
                1.0
            } else {
                pearson(x.column_at(i), x.column_at(j)).abs()
            };
            correlations.push(value);
        }
    }
    correlations
}

/// Univariate regression F-statistics and p-values, one per feature.
///
/// Follows the textbook single-regressor test: F = r² / (1 - r²) · dof with
/// dof = n - 2. Degenerate columns (and a degenerate target) short-circuit
/// to the correlation floor; a perfect correlation maps to `f64::MAX`
/// rather than infinity. With fewer than 3 rows the test is undefined, so
/// every F falls back to the floor and every p-value to 1.0.
pub fn f_statistics(x: &FeatureFrame, y: &TargetColumn) -> (Array1<f64>, Array1<f64>) {
    assert_eq!(
        x.n_rows(),
        y.len(),
        "F-statistics require the frame and target to have equal row counts"
    );

    let p = x.n_features();
    let dof = x.n_rows() as f64 - 2.0;
    let fallback = || {
        (
            Array1::from_elem(p, CORRELATION_FLOOR),
            Array1::from_elem(p, 1.0),
        )
    };

    if dof <= 0.0 {
        log::warn!(
            "regression F-test needs at least 3 rows, got {}; returning floor scores",
            x.n_rows()
        );
        return fallback();
    }
    let f_dist = match FisherSnedecor::new(1.0, dof) {
        Ok(dist) => dist,
        Err(err) => {
            log::warn!("F-distribution unavailable ({}); returning floor scores", err);
            return fallback();
        }
    };

    let y_view = y.values();
    let y_degenerate = stats::is_degenerate(y_view);
    if y_degenerate {
        log::warn!(
            "target '{}' has fewer than 2 distinct values; relevance is degenerate",
            y.name()
        );
    }

    let mut f_values = Array1::zeros(p);
    let mut p_values = Array1::zeros(p);
    for i in 0..p {
        let col = x.column_at(i);
        let f = if y_degenerate || stats::is_degenerate(col) {
            CORRELATION_FLOOR
        } else {
            let r = pearson(col, y_view);
            let r2 = (r * r).min(1.0);
            if r2 >= 1.0 {
                f64::MAX
            } else {
                r2 / (1.0 - r2) * dof
            }
        };
        f_values[i] = f;
        p_values[i] = 1.0 - f_dist.cdf(f);
    }

    (f_values, p_values)
}

/// Relevance scores aligned with the frame's column order: F-statistics
/// normalized so the maximum is 1.0.
///
/// When no finite, above-floor maximum exists (every column degenerate, or
/// too few rows for the F-test) every score becomes the correlation floor
/// for this call; stale results are never reused.
pub fn relevance_scores(x: &FeatureFrame, y: &TargetColumn) -> Array1<f64> {
    let (raw, _) = f_statistics(x, y);
    if raw.is_empty() {
        return raw;
    }
    match QuantileExt::max(&raw) {
        Ok(&max) if max.is_finite() && max > CORRELATION_FLOOR => raw.mapv(|f| f / max),
        _ => {
            log::warn!(
                "no usable relevance maximum across {} features; substituting the correlation floor",
                x.n_features()
            );
            Array1::from_elem(x.n_features(), CORRELATION_FLOOR)
        }
    }
}

/// Signed feature-vs-target correlations, sorted by magnitude descending.
///
/// Degenerate columns carry the correlation floor and therefore sort last.
pub fn target_correlations(x: &FeatureFrame, y: &TargetColumn) -> Vec<FeatureScore> {
    assert_eq!(
        x.n_rows(),
        y.len(),
        "target correlations require the frame and target to have equal row counts"
    );
    let y_view = y.values();
    let mut scores: Vec<FeatureScore> = x
        .feature_names()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), pair_correlation(x.column_at(i), y_view)))
        .collect();
    scores.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores
}

/// Cheap relevance proxy: |var(feature) / var(target)| per column.
///
/// Uses population variances. Returns floor scores when the target has no
/// variance.
pub fn variance_ratio_scores(x: &FeatureFrame, y: &TargetColumn) -> Array1<f64> {
    assert_eq!(
        x.n_rows(),
        y.len(),
        "variance ratios require the frame and target to have equal row counts"
    );
    let var_y = y.values().iter().population_variance();
    if !(var_y > 0.0) {
        log::warn!(
            "target '{}' has zero variance; variance-ratio scores are degenerate",
            y.name()
        );
        return Array1::from_elem(x.n_features(), CORRELATION_FLOOR);
    }
    let mut scores = Array1::zeros(x.n_features());
    for i in 0..x.n_features() {
        let var_x = x.column_at(i).iter().population_variance();
        scores[i] = (var_x / var_y).abs();
    }
    scores
}
