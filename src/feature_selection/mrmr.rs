//! Greedy minimum-redundancy maximum-relevance selection.
//!
//! The selector seeds with the most relevant feature, then repeatedly
//! extends the selection with whichever remaining feature maximizes the
//! configured objective, recomputing relevance and redundancy from scratch
//! for every candidate set. The full recompute keeps each round's
//! statistics numerically independent; with tens of features the O(k·n)
//! cost is irrelevant next to the robustness it buys.

use anyhow::{ensure, Result};
use rayon::prelude::*;

use crate::config::SelectionConfig;
use crate::dataset::{FeatureFrame, TargetColumn};
use crate::feature_selection::correlation::{self, CORRELATION_FLOOR};

/// Relevance and redundancy of a candidate feature set.
///
/// Relevance is the mean normalized F-score of the selected sub-frame
/// against the target; redundancy is the mean absolute pairwise correlation
/// over every ordered pair of selected columns, self-pairs included. Both
/// are finite for any input thanks to the degenerate-column guards, and the
/// computation is stateless: the same arguments always produce the same
/// pair.
pub fn relevance_redundancy(
    x: &FeatureFrame,
    y: &TargetColumn,
    selected: &[String],
) -> Result<(f64, f64)> {
    ensure!(
        !selected.is_empty(),
        "relevance/redundancy requires at least one selected feature"
    );
    let sub = x.select(selected)?;

    let rel_scores = correlation::relevance_scores(&sub, y);
    let rel = rel_scores.mean().unwrap_or(CORRELATION_FLOOR);

    let pairwise = correlation::self_correlation(&sub);
    let red = pairwise.iter().sum::<f64>() / pairwise.len() as f64;

    ensure!(
        rel.is_finite() && red.is_finite(),
        "non-finite relevance/redundancy for candidate set {:?}",
        selected
    );
    Ok((rel, red))
}

struct SelectionState {
    selected: Vec<String>,
    remaining: Vec<String>,
    objective: f64,
}

/// Greedy mRMR feature selector.
pub struct MrmrSelector {
    config: SelectionConfig,
}

impl MrmrSelector {
    pub fn new(config: SelectionConfig) -> Self {
        MrmrSelector { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Run the greedy search and return the selected feature names in
    /// selection order.
    ///
    /// `k < 1` returns an empty selection. When `k` exceeds the number of
    /// features the whole frame is returned, ordered by the search. A
    /// candidate whose scoring fails is skipped for that round; a round in
    /// which every candidate fails terminates the search early with the
    /// features gathered so far.
    pub fn select(&self, x: &FeatureFrame, y: &TargetColumn) -> Result<Vec<String>> {
        if self.config.k < 1 {
            return Ok(Vec::new());
        }
        if x.n_features() == 0 {
            log::warn!("mRMR called on a frame with no feature columns");
            return Ok(Vec::new());
        }
        ensure!(
            x.n_rows() == y.len(),
            "feature frame has {} rows but target '{}' has {}",
            x.n_rows(),
            y.name(),
            y.len()
        );

        // Seed with the single most relevant feature. Strict > keeps the
        // first feature in column order on ties.
        let scores = correlation::relevance_scores(x, y);
        let mut seed = 0usize;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[seed] {
                seed = i;
            }
        }

        let mut state = SelectionState {
            selected: vec![x.feature_names()[seed].clone()],
            remaining: x
                .feature_names()
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != seed)
                .map(|(_, name)| name.clone())
                .collect(),
            objective: 0.0,
        };

        let (rel, red) = relevance_redundancy(x, y, &state.selected)?;
        state.objective = self.config.objective.combine(rel, red);
        if self.config.verbosity.summary() {
            log::info!(
                "seed feature '{}' (relevance {:.6}, redundancy {:.6}, objective {:.6})",
                state.selected[0],
                rel,
                red,
                state.objective
            );
        }

        for round in 1..self.config.k {
            if state.remaining.is_empty() {
                break;
            }
            if self.config.verbosity.per_candidate() {
                log::debug!("--- round {} ---", round);
            }

            let objective = self.config.objective;
            let per_candidate = self.config.verbosity.per_candidate();

            // Score every candidate extension independently; state stays
            // untouched until the round's winner is known.
            let scored: Vec<Option<f64>> = state
                .remaining
                .par_iter()
                .map(|name| {
                    let mut trial = state.selected.clone();
                    trial.push(name.clone());
                    match relevance_redundancy(x, y, &trial) {
                        Ok((rel, red)) => {
                            let value = objective.combine(rel, red);
                            if !value.is_finite() {
                                log::warn!(
                                    "round {}: skipping '{}' (objective is not finite)",
                                    round,
                                    name
                                );
                                return None;
                            }
                            if per_candidate {
                                log::debug!(
                                    "round {}: candidate '{}' rel {:.6} red {:.6} value {:.6}",
                                    round,
                                    name,
                                    rel,
                                    red,
                                    value
                                );
                            }
                            Some(value)
                        }
                        Err(err) => {
                            log::warn!("round {}: skipping '{}' ({})", round, name, err);
                            None
                        }
                    }
                })
                .collect();

            // Strict > over candidate order: first encountered wins ties.
            let mut winner: Option<(usize, f64)> = None;
            for (i, value) in scored.iter().enumerate() {
                if let Some(value) = value {
                    if winner.map_or(true, |(_, best)| *value > best) {
                        winner = Some((i, *value));
                    }
                }
            }

            let Some((idx, value)) = winner else {
                log::warn!(
                    "round {}: no candidate produced a usable statistic; stopping with {} features",
                    round,
                    state.selected.len()
                );
                break;
            };

            let name = state.remaining.remove(idx);
            if self.config.verbosity.summary() {
                log::info!(
                    "round {} added feature '{}' for an overall objective of {:.6}",
                    round,
                    name,
                    value
                );
            }
            state.selected.push(name);
            state.objective = value;
        }

        if self.config.verbosity.summary() {
            log::info!(
                "mRMR selected {} features (final objective {:.6}): {:?}",
                state.selected.len(),
                state.objective,
                state.selected
            );
        }
        Ok(state.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Objective, Verbosity};
    use crate::dataset::{FeatureFrame, TargetColumn};

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> FeatureFrame {
        FeatureFrame::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), values))
                .collect(),
        )
        .unwrap()
    }

    fn fixture() -> (FeatureFrame, TargetColumn) {
        let x = frame(vec![
            ("noise", vec![5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0, 6.0]),
            ("signal", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]),
            ("echo", vec![2.1, 3.9, 6.1, 7.9, 10.1, 11.9, 14.1, 15.9]),
        ]);
        let y = TargetColumn::new("y", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        (x, y)
    }

    #[test]
    fn k_zero_returns_empty() {
        let (x, y) = fixture();
        let selector = MrmrSelector::new(SelectionConfig::new(
            0,
            Objective::Additive,
            Verbosity::Silent,
        ));
        assert!(selector.select(&x, &y).unwrap().is_empty());
    }

    #[test]
    fn k_one_returns_the_seed() {
        let (x, y) = fixture();
        let selector = MrmrSelector::new(SelectionConfig::new(
            1,
            Objective::Additive,
            Verbosity::Silent,
        ));
        let selected = selector.select(&x, &y).unwrap();
        assert_eq!(selected, vec!["signal".to_string()]);
    }

    #[test]
    fn seed_ties_resolve_to_first_column() {
        // Two identical columns tie on relevance; the earlier one wins.
        let x = frame(vec![
            ("first", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("second", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ]);
        let y = TargetColumn::new("y", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        let selector = MrmrSelector::new(SelectionConfig::new(
            1,
            Objective::Additive,
            Verbosity::Silent,
        ));
        assert_eq!(selector.select(&x, &y).unwrap(), vec!["first".to_string()]);
    }

    #[test]
    fn scorer_is_stateless() {
        let (x, y) = fixture();
        let selected = vec!["signal".to_string(), "noise".to_string()];
        let first = relevance_redundancy(&x, &y, &selected).unwrap();
        let second = relevance_redundancy(&x, &y, &selected).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn scorer_rejects_empty_selection() {
        let (x, y) = fixture();
        assert!(relevance_redundancy(&x, &y, &[]).is_err());
    }
}
