//! Single-pass feature rankers.
//!
//! Cheaper baselines to the greedy mRMR search: a univariate k-best filter
//! and a gradient-boosted ensemble scored with permutation importance.
//! Both consume the same frame/target contract as the selector and return
//! feature names rather than column indices.

use anyhow::{ensure, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::dataset::{FeatureFrame, TargetColumn};
use crate::feature_selection::correlation;
use crate::feature_selection::FeatureScore;

/// Select the k features with the highest univariate F scores.
pub struct KBestSelector {
    k: usize,
}

impl KBestSelector {
    pub fn new(k: usize) -> Self {
        KBestSelector { k }
    }

    /// Top-k feature names, strongest first. Ties keep column order.
    pub fn fit(&self, x: &FeatureFrame, y: &TargetColumn) -> Vec<String> {
        let (f_scores, _) = correlation::f_statistics(x, y);

        let mut indices: Vec<usize> = (0..f_scores.len()).collect();
        indices.sort_by(|&i, &j| {
            f_scores[j]
                .partial_cmp(&f_scores[i])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        indices
            .into_iter()
            .take(self.k)
            .map(|i| x.feature_names()[i].clone())
            .collect()
    }
}

/// Hyper-parameters for the GBDT importance ranker.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GbdtRankerParams {
    pub num_boost_round: usize,
    pub max_depth: u32,
    pub learning_rate: f32,
    /// Permutation repeats per feature.
    pub n_repeats: usize,
    pub seed: u64,
    /// When set, `select` truncates the ranking at the first feature whose
    /// normalized importance falls below this value.
    pub importance_cutoff: Option<f64>,
}

impl Default for GbdtRankerParams {
    fn default() -> Self {
        Self {
            num_boost_round: 25,
            max_depth: 6,
            learning_rate: 0.1,
            n_repeats: 5,
            seed: 42,
            importance_cutoff: None,
        }
    }
}

/// Ensemble-importance ranker: fits a squared-error GBDT regressor and
/// scores each feature by how much shuffling it degrades the fit.
pub struct GbdtImportanceRanker {
    params: GbdtRankerParams,
}

impl GbdtImportanceRanker {
    pub fn new(params: GbdtRankerParams) -> Self {
        GbdtImportanceRanker { params }
    }

    pub fn params(&self) -> &GbdtRankerParams {
        &self.params
    }

    /// Rank all features by permutation importance, strongest first.
    ///
    /// Importances are mean MSE increases over `n_repeats` shuffles,
    /// clamped at zero and normalized to sum to 1.0 (when any feature
    /// matters at all). The shuffle stream is seeded, so ranks are
    /// reproducible for fixed params.
    pub fn rank(&self, x: &FeatureFrame, y: &TargetColumn) -> Result<Vec<FeatureScore>> {
        ensure!(
            x.n_features() > 0,
            "importance ranking requires at least one feature"
        );
        ensure!(
            x.n_rows() == y.len(),
            "feature frame has {} rows but target '{}' has {}",
            x.n_rows(),
            y.name(),
            y.len()
        );
        ensure!(
            x.n_rows() >= 2,
            "importance ranking requires at least two rows"
        );

        let model = self.fit(x, y);
        let baseline = mse(&model.predict(&to_data_vec(x, None)), y);
        log::debug!("permutation importance baseline MSE {:.6}", baseline);

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let n_repeats = self.params.n_repeats.max(1);
        let mut raw = vec![0.0f64; x.n_features()];
        for feature in 0..x.n_features() {
            let mut increase = 0.0;
            for _ in 0..n_repeats {
                let mut shuffled: Vec<f64> = x.column_at(feature).iter().copied().collect();
                shuffled.shuffle(&mut rng);
                let permuted = to_data_vec(x, Some((feature, &shuffled)));
                increase += mse(&model.predict(&permuted), y) - baseline;
            }
            raw[feature] = (increase / n_repeats as f64).max(0.0);
        }

        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            for v in raw.iter_mut() {
                *v /= total;
            }
        } else {
            log::warn!("permutation importance is zero for every feature");
        }

        let mut ranked: Vec<FeatureScore> =
            x.feature_names().iter().cloned().zip(raw).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }

    /// Ranked feature names, truncated at the importance cutoff when one is
    /// configured.
    pub fn select(&self, x: &FeatureFrame, y: &TargetColumn) -> Result<Vec<String>> {
        let ranked = self.rank(x, y)?;
        let names = match self.params.importance_cutoff {
            Some(cutoff) => ranked
                .into_iter()
                .take_while(|(_, importance)| *importance >= cutoff)
                .map(|(name, _)| name)
                .collect(),
            None => ranked.into_iter().map(|(name, _)| name).collect(),
        };
        Ok(names)
    }

    fn fit(&self, x: &FeatureFrame, y: &TargetColumn) -> GBDT {
        let mut config = Config::new();
        config.set_feature_size(x.n_features());
        config.set_max_depth(self.params.max_depth);
        config.set_iterations(self.params.num_boost_round);
        config.set_shrinkage(self.params.learning_rate);
        config.set_loss("SquaredError");
        config.set_training_optimization_level(2);

        let mut model = GBDT::new(&config);
        let y_view = y.values();
        let mut train: DataVec = (0..x.n_rows())
            .map(|row| Data::new_training_data(feature_row(x, row, None), 1.0, y_view[row] as f32, None))
            .collect();
        model.fit(&mut train);
        model
    }
}

impl Default for GbdtImportanceRanker {
    fn default() -> Self {
        GbdtImportanceRanker::new(GbdtRankerParams::default())
    }
}

fn feature_row(x: &FeatureFrame, row: usize, replace: Option<(usize, &[f64])>) -> Vec<f32> {
    let mut values: Vec<f32> = x.values().row(row).iter().map(|&v| v as f32).collect();
    if let Some((feature, column)) = replace {
        values[feature] = column[row] as f32;
    }
    values
}

fn to_data_vec(x: &FeatureFrame, replace: Option<(usize, &[f64])>) -> DataVec {
    (0..x.n_rows())
        .map(|row| Data::new_training_data(feature_row(x, row, replace), 1.0, 0.0, None))
        .collect()
}

fn mse(predictions: &[f32], y: &TargetColumn) -> f64 {
    let mut err = 0.0;
    for (pred, actual) in predictions.iter().zip(y.values().iter()) {
        let d = *pred as f64 - actual;
        err += d * d;
    }
    err / predictions.len() as f64
}
