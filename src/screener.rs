use log::{debug, info, warn};

use crate::config::{check_margin, ScreenerConfig};
use crate::data::filter::{retain_qualifying, AcceptanceBand, InteractionCandidate};
use crate::data::model::FeatureTable;
use crate::error::{Result, ScreenerError};
use crate::interaction::{CorrelationMode, InteractionOperator};
use crate::report::{
    progress_step, BaselineBounds, BaselineCorrelation, HoldoutFlag, HoldoutReport,
    ScreenProgress, ScreenReport,
};

// ---------------------------------------------------------------------------
// HoldoutSet – rows never seen by screening
// ---------------------------------------------------------------------------

/// Held-out features and target, row-aligned.
#[derive(Debug, Clone)]
pub struct HoldoutSet {
    pub features: FeatureTable,
    pub target: Vec<f64>,
}

impl HoldoutSet {
    pub fn new(features: FeatureTable, target: Vec<f64>) -> Result<Self> {
        features.ensure_rows(target.len())?;
        Ok(Self { features, target })
    }
}

// ---------------------------------------------------------------------------
// Screener
// ---------------------------------------------------------------------------

/// Pairwise-interaction screener.
///
/// The feature table, target, correlation mode and operator are fixed at
/// construction. Mutation points:
/// * [`screen_pairs`](Self::screen_pairs) computes the baseline bounds and
///   rebuilds the accepted list;
/// * [`change_margin`](Self::change_margin) and
///   [`validate_holdout`](Self::validate_holdout) (with `remove`) only shrink it.
#[derive(Debug, Clone)]
pub struct Screener {
    features: FeatureTable,
    target: Vec<f64>,
    config: ScreenerConfig,
    holdout: Option<HoldoutSet>,
    baseline: Vec<BaselineCorrelation>,
    bounds: Option<BaselineBounds>,
    accepted: Vec<InteractionCandidate>,
}

impl Screener {
    /// Validate inputs and set up an unscreened instance.
    ///
    /// In Pearson mode every column must be standardized (|mean| < 0.1,
    /// sample std in [0.9, 1.1]).
    pub fn new(features: FeatureTable, target: Vec<f64>, config: ScreenerConfig) -> Result<Self> {
        config.validate()?;
        if features.is_empty() {
            return Err(ScreenerError::InvalidInput(
                "feature table has no columns".to_string(),
            ));
        }
        features.ensure_rows(target.len())?;

        if config.corr_mode == CorrelationMode::Pearson {
            if let Some(col) = features.first_unstandardized() {
                let s = col.summary();
                return Err(ScreenerError::InvalidInput(format!(
                    "features must be normalized for Pearson correlation \
                     (column '{}': mean {:.4}, std {:.4})",
                    col.name, s.mean, s.std_dev
                )));
            }
        }

        debug!(
            "Screener over {} features x {} rows ({}, '{}', margin {})",
            features.n_columns(),
            features.n_rows(),
            config.corr_mode,
            config.interaction,
            config.margin
        );

        Ok(Self {
            features,
            target,
            config,
            holdout: None,
            baseline: Vec::new(),
            bounds: None,
            accepted: Vec::new(),
        })
    }

    /// Attach a held-out set for [`validate_attached_holdout`](Self::validate_attached_holdout).
    pub fn with_holdout(mut self, holdout: HoldoutSet) -> Self {
        self.holdout = Some(holdout);
        self
    }

    // -- accessors --

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    pub fn margin(&self) -> f64 {
        self.config.margin
    }

    pub fn holdout(&self) -> Option<&HoldoutSet> {
        self.holdout.as_ref()
    }

    /// Accepted pairs in enumeration order.
    pub fn accepted(&self) -> &[InteractionCandidate] {
        &self.accepted
    }

    pub fn into_accepted(self) -> Vec<InteractionCandidate> {
        self.accepted
    }

    /// Per-feature correlations from the last screening (empty before).
    pub fn baseline(&self) -> &[BaselineCorrelation] {
        &self.baseline
    }

    pub fn bounds(&self) -> Option<BaselineBounds> {
        self.bounds
    }

    /// Band for the current margin, once screened.
    pub fn band(&self) -> Option<AcceptanceBand> {
        self.bounds
            .map(|b| AcceptanceBand::new(b.corr_min, b.corr_max, self.config.margin))
    }

    /// Correlation of `a ∘ b` with the target, in the configured mode and operator.
    pub fn derived_correlation(&self, a: &str, b: &str) -> Result<f64> {
        let derived = self
            .config
            .interaction
            .apply(self.features.values(a)?, self.features.values(b)?);
        Ok(self.config.corr_mode.correlate(&derived, &self.target))
    }

    // -- screening --

    /// Screen every pair, logging progress when `verbose` is set.
    pub fn screen_pairs(&mut self) -> ScreenReport {
        let verbose = self.config.verbose;
        self.screen_pairs_with(|p| {
            if verbose {
                info!("Itération {}/{}", p.processed, p.total);
            }
        })
    }

    /// Screen every pair, reporting progress to `on_progress`.
    ///
    /// Pairs are visited as (earlier column, later column) in table order.
    /// The accepted list is rebuilt from scratch.
    pub fn screen_pairs_with<F>(&mut self, mut on_progress: F) -> ScreenReport
    where
        F: FnMut(ScreenProgress),
    {
        let mode = self.config.corr_mode;
        let op = self.config.interaction;

        self.baseline = self
            .features
            .columns()
            .iter()
            .map(|col| BaselineCorrelation {
                feature: col.name.clone(),
                correlation: mode.correlate(&col.values, &self.target),
            })
            .collect();

        let bounds = baseline_bounds(&self.baseline);
        self.bounds = Some(bounds);
        info!(
            "La corrélation ({}) minimale avec la cible est {:.4} ; la corrélation maximale avec la cible est {:.4}.",
            mode, bounds.corr_min, bounds.corr_max
        );

        let band = AcceptanceBand::new(bounds.corr_min, bounds.corr_max, self.config.margin);
        let total = self.features.n_pairs();
        let step = progress_step(total);
        let columns = self.features.columns();

        let mut accepted = Vec::new();
        let mut index = 0;
        for (i, col_a) in columns.iter().enumerate() {
            for col_b in &columns[i + 1..] {
                let derived = op.apply(&col_a.values, &col_b.values);
                let c = mode.correlate(&derived, &self.target);

                if band.qualifies(c) {
                    debug!("{} {} {} -> {:.4}", col_a.name, op, col_b.name, c);
                    accepted.push(InteractionCandidate::new(
                        col_a.name.clone(),
                        col_b.name.clone(),
                        c,
                    ));
                }

                if index % step == 0 {
                    on_progress(ScreenProgress {
                        processed: index + 1,
                        total,
                    });
                }
                index += 1;
            }
        }

        self.accepted = accepted;

        ScreenReport {
            corr_mode: mode,
            interaction: op,
            bounds,
            baseline: self.baseline.clone(),
            pairs_evaluated: total,
            accepted: self.accepted.len(),
        }
    }

    // -- held-out validation --

    /// Re-check accepted pairs on held-out rows.
    ///
    /// Always uses Pearson correlation of the *product* `a * b`, whatever the
    /// configured mode and operator. Use
    /// [`validate_holdout_using`](Self::validate_holdout_using) to choose.
    pub fn validate_holdout(&mut self, holdout: &HoldoutSet, remove: bool) -> Result<HoldoutReport> {
        self.validate_holdout_using(
            holdout,
            remove,
            CorrelationMode::Pearson,
            InteractionOperator::Multiply,
        )
    }

    /// Validate against the set attached with [`with_holdout`](Self::with_holdout).
    pub fn validate_attached_holdout(&mut self, remove: bool) -> Result<HoldoutReport> {
        let holdout = self.holdout.take().ok_or(ScreenerError::NoHoldout)?;
        let result = self.validate_holdout(&holdout, remove);
        self.holdout = Some(holdout);
        result
    }

    /// Flag accepted pairs whose held-out correlation lies strictly inside the
    /// training band; drop them when `remove` is set.
    ///
    /// All correlations are computed before the list is touched, so an error
    /// leaves the screener unchanged and every pair is checked exactly once.
    pub fn validate_holdout_using(
        &mut self,
        holdout: &HoldoutSet,
        remove: bool,
        mode: CorrelationMode,
        op: InteractionOperator,
    ) -> Result<HoldoutReport> {
        let band = self.band().ok_or(ScreenerError::NotScreened)?;
        holdout.features.ensure_rows(holdout.target.len())?;

        let mut inside = Vec::with_capacity(self.accepted.len());
        let mut flags = Vec::new();
        for cand in &self.accepted {
            let a = holdout.features.values(&cand.feature_a)?;
            let b = holdout.features.values(&cand.feature_b)?;
            let c = mode.correlate(&op.apply(a, b), &holdout.target);

            let flagged = band.is_inside(c);
            if flagged {
                warn!(
                    "///Corr. entre {} et {} = {:.4}, significative sur le train mais pas sur le valid !///",
                    cand.feature_a, cand.feature_b, c
                );
                flags.push(HoldoutFlag {
                    feature_a: cand.feature_a.clone(),
                    feature_b: cand.feature_b.clone(),
                    correlation: c,
                    removed: remove,
                });
            }
            inside.push(flagged);
        }

        let checked = self.accepted.len();
        let mut removed = 0;
        if remove && !flags.is_empty() {
            self.accepted = std::mem::take(&mut self.accepted)
                .into_iter()
                .zip(inside)
                .filter_map(|(cand, flagged)| (!flagged).then_some(cand))
                .collect();
            removed = checked - self.accepted.len();
        }

        Ok(HoldoutReport {
            checked,
            flags,
            removed,
        })
    }

    // -- margin --

    /// Replace the margin and drop accepted pairs that no longer clear it.
    ///
    /// Uses the correlations recorded at screening time and the bounds from
    /// that screening, so it can only shrink the list. Returns how many were dropped.
    pub fn change_margin(&mut self, new_margin: f64) -> Result<usize> {
        check_margin(new_margin)?;
        self.config.margin = new_margin;

        let Some(band) = self.band() else {
            return Ok(0);
        };
        let dropped = retain_qualifying(&mut self.accepted, &band);
        debug!(
            "Margin set to {new_margin}: dropped {dropped}, {} remain",
            self.accepted.len()
        );
        Ok(dropped)
    }
}

/// Min/max over the finite baseline correlations. A constant column has no
/// defined correlation and does not widen the band.
fn baseline_bounds(baseline: &[BaselineCorrelation]) -> BaselineBounds {
    let mut finite = baseline
        .iter()
        .map(|b| b.correlation)
        .filter(|c| c.is_finite())
        .peekable();

    if finite.peek().is_none() {
        return BaselineBounds {
            corr_min: f64::NAN,
            corr_max: f64::NAN,
        };
    }

    let (corr_min, corr_max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        (lo.min(c), hi.max(c))
    });
    BaselineBounds { corr_min, corr_max }
}
