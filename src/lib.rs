//! mrmr-select: minimum-redundancy maximum-relevance feature selection.
//!
//! This crate scores tabular features against a regression target with
//! normalized univariate F-statistics, measures redundancy among selected
//! features as mean absolute Pearson correlation, and runs a greedy mRMR
//! search over the trade-off. Auxiliary single-pass rankers (univariate
//! k-best, GBDT permutation importance) share the same input contract and
//! serve as cheaper baselines.
//!
//! Inputs arrive as cleaned, row-aligned numeric frames; CSV ingestion,
//! train/test splitting, normalization and the downstream regression
//! harness live outside this crate and consume only the feature-name lists
//! and score mappings produced here.
pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_selection;
pub mod stats;
