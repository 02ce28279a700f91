//! Feature selection utilities.
//!
//! Correlation and F-statistic scoring, the greedy mRMR search, and
//! single-pass importance rankers used as cheaper baselines.
pub mod correlation;
pub mod mrmr;
pub mod rankers;

/// A feature name paired with a score; produced fresh by every ranking call.
pub type FeatureScore = (String, f64);
