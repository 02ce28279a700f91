use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::feature_selection::correlation::CORRELATION_FLOOR;

/// Central configuration for an mRMR selection run.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SelectionConfig {
    /// Number of features to select. Values below 1 yield an empty
    /// selection rather than an error.
    pub k: usize,
    pub objective: Objective,
    pub verbosity: Verbosity,
}

impl SelectionConfig {
    pub fn new(k: usize, objective: Objective, verbosity: Verbosity) -> Self {
        Self {
            k,
            objective,
            verbosity,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            k: 10,
            objective: Objective::Additive,
            verbosity: Verbosity::Summary,
        }
    }
}

/// How relevance and redundancy combine into a single objective value.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// FCD: objective = relevance - redundancy.
    Additive,
    /// FCQ: objective = relevance / redundancy.
    Multiplicative,
}

impl Objective {
    /// Combine a (relevance, redundancy) pair.
    ///
    /// The multiplicative quotient floors its denominator so the objective
    /// stays bounded when the selected features are nearly uncorrelated.
    pub fn combine(&self, relevance: f64, redundancy: f64) -> f64 {
        match self {
            Objective::Additive => relevance - redundancy,
            Objective::Multiplicative => relevance / redundancy.max(CORRELATION_FLOOR),
        }
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "additive" | "fcd" => Ok(Objective::Additive),
            "multiplicative" | "fcq" => Ok(Objective::Multiplicative),
            _ => Err(format!(
                "Unknown objective: {}. Expected additive/fcd or multiplicative/fcq",
                s
            )),
        }
    }
}

/// How much of the search gets narrated to the log.
///
/// Degenerate-statistic warnings are always emitted; verbosity only gates
/// the per-round and per-candidate narration.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Silent,
    Summary,
    PerCandidate,
}

impl Verbosity {
    pub fn summary(&self) -> bool {
        *self >= Verbosity::Summary
    }

    pub fn per_candidate(&self) -> bool {
        *self >= Verbosity::PerCandidate
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(Verbosity::Silent),
            "summary" => Ok(Verbosity::Summary),
            "per_candidate" | "per-candidate" | "detailed" => Ok(Verbosity::PerCandidate),
            _ => Err(format!(
                "Unknown verbosity: {}. Expected silent, summary or per_candidate",
                s
            )),
        }
    }
}
