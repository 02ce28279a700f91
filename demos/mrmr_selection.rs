//! End-to-end demo: build a synthetic housing-like dataset, run both mRMR
//! modes and the auxiliary rankers, and print the results.
//!
//! Run with `RUST_LOG=info cargo run --example mrmr_selection` to see the
//! per-round narration.

use anyhow::Result;

use mrmr_select::config::{Objective, SelectionConfig, Verbosity};
use mrmr_select::dataset::{FeatureFrame, TargetColumn};
use mrmr_select::feature_selection::correlation::target_correlations;
use mrmr_select::feature_selection::mrmr::MrmrSelector;
use mrmr_select::feature_selection::rankers::{
    GbdtImportanceRanker, GbdtRankerParams, KBestSelector,
};
use mrmr_select::stats;

fn synthetic_housing() -> (FeatureFrame, TargetColumn) {
    let n = 24;
    let mut sqft_living = Vec::with_capacity(n);
    let mut grade = Vec::with_capacity(n);
    let mut bathrooms = Vec::with_capacity(n);
    let mut yr_noise = Vec::with_capacity(n);
    let mut waterfront = Vec::with_capacity(n);
    let mut price = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f64;
        let sqft = 900.0 + 85.0 * t;
        let g = 4.0 + (t / 3.0).floor();
        let baths = 1.0 + ((i % 5) as f64) * 0.5;
        // Deterministic scatter, decorrelated from the trend.
        let noise = ((i * 7 + 3) % 24) as f64;

        sqft_living.push(sqft);
        grade.push(g);
        bathrooms.push(baths);
        yr_noise.push(noise);
        waterfront.push(0.0);
        price.push(150.0 * sqft / 1000.0 + 20.0 * g + 8.0 * baths);
    }

    let x = FeatureFrame::from_columns(vec![
        ("sqft_living".to_string(), sqft_living),
        ("grade".to_string(), grade),
        ("bathrooms".to_string(), bathrooms),
        ("yr_noise".to_string(), yr_noise),
        ("waterfront".to_string(), waterfront),
    ])
    .expect("demo columns are aligned");
    (x, TargetColumn::new("price", price))
}

fn main() -> Result<()> {
    env_logger::init();

    let (x, y) = synthetic_housing();
    println!(
        "Dataset: {} rows, {} features, target '{}'",
        x.n_rows(),
        x.n_features(),
        y.name()
    );

    let summaries = stats::summarize(&x);
    let sqft = &summaries["sqft_living"];
    println!(
        "sqft_living: mean {:.1}, median {:.1}, std {:.1}, mode {:?}",
        sqft.mean, sqft.median, sqft.std_dev, sqft.mode
    );

    println!("\nFeature-target correlations (by magnitude):");
    for (name, r) in target_correlations(&x, &y) {
        println!("  {:<12} {:>9.4}", name, r);
    }

    for objective in [Objective::Additive, Objective::Multiplicative] {
        let selector = MrmrSelector::new(SelectionConfig::new(3, objective, Verbosity::Summary));
        let selected = selector.select(&x, &y)?;
        println!("\nmRMR ({:?}) selected: {:?}", objective, selected);
    }

    let k_best = KBestSelector::new(3).fit(&x, &y);
    println!("\nUnivariate k-best: {:?}", k_best);

    let ranker = GbdtImportanceRanker::new(GbdtRankerParams {
        importance_cutoff: Some(0.05),
        ..GbdtRankerParams::default()
    });
    println!("\nGBDT permutation importance:");
    for (name, importance) in ranker.rank(&x, &y)? {
        println!("  {:<12} {:>8.4}", name, importance);
    }
    println!("Above cutoff: {:?}", ranker.select(&x, &y)?);

    Ok(())
}
