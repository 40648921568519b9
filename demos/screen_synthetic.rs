//! Screen a synthetic table with a planted `x1 * x2` interaction, check the
//! survivors on a second sample, then tighten the margin.
//!
//! ```text
//! RUST_LOG=info cargo run --example screen_synthetic
//! ```

use anyhow::{Context, Result};
use pair_screener::data::synthetic::PlantedInteraction;
use pair_screener::{HoldoutSet, Screener, ScreenerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let sample = PlantedInteraction::default().with_noise_features(4);
    let (features, target) = sample.generate().context("generating training sample")?;
    let (valid_features, valid_target) = sample
        .clone()
        .with_seed(7)
        .with_rows(1_000)
        .generate()
        .context("generating held-out sample")?;

    let config = ScreenerConfig::from_json_str(r#"{"margin": 0.02, "interaction": "*"}"#)
        .context("parsing screener config")?;

    let mut screener = Screener::new(features, target, config)?
        .with_holdout(HoldoutSet::new(valid_features, valid_target)?);

    let report = screener.screen_pairs();
    log::info!(
        "{} pairs screened, {} accepted",
        report.pairs_evaluated,
        report.accepted
    );

    let holdout = screener.validate_attached_holdout(true)?;
    log::info!(
        "held-out check: {} flagged, {} removed",
        holdout.flags.len(),
        holdout.removed
    );

    let dropped = screener.change_margin(0.1)?;
    log::info!("margin 0.1 dropped {dropped}");

    println!(
        "{}",
        serde_json::to_string_pretty(screener.accepted()).context("serializing candidates")?
    );
    Ok(())
}
