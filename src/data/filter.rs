use serde::{Deserialize, Serialize};

use crate::stats::round4;

// ---------------------------------------------------------------------------
// InteractionCandidate – one accepted pair
// ---------------------------------------------------------------------------

/// A derived feature `feature_a ∘ feature_b` whose correlation with the target
/// cleared the acceptance band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionCandidate {
    pub feature_a: String,
    pub feature_b: String,
    /// Rounded to 4 decimals.
    pub correlation: f64,
    /// Unrounded value the acceptance decision was made on. Re-filtering uses
    /// this one so that re-applying the screening margin is a no-op.
    pub exact_correlation: f64,
}

impl InteractionCandidate {
    pub fn new(feature_a: impl Into<String>, feature_b: impl Into<String>, correlation: f64) -> Self {
        Self {
            feature_a: feature_a.into(),
            feature_b: feature_b.into(),
            correlation: round4(correlation),
            exact_correlation: correlation,
        }
    }
}

// ---------------------------------------------------------------------------
// AcceptanceBand – the baseline range widened by the margin
// ---------------------------------------------------------------------------

/// `[corr_min - margin, corr_max + margin]` around the single-feature correlations.
///
/// A derived correlation *qualifies* when it lies strictly outside the band and
/// is *inside* when it lies strictly within it. NaN is neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceBand {
    pub corr_min: f64,
    pub corr_max: f64,
    pub margin: f64,
}

impl AcceptanceBand {
    pub fn new(corr_min: f64, corr_max: f64, margin: f64) -> Self {
        Self {
            corr_min,
            corr_max,
            margin,
        }
    }

    pub fn lower(&self) -> f64 {
        self.corr_min - self.margin
    }

    pub fn upper(&self) -> f64 {
        self.corr_max + self.margin
    }

    pub fn qualifies(&self, correlation: f64) -> bool {
        correlation < self.lower() || correlation > self.upper()
    }

    pub fn is_inside(&self, correlation: f64) -> bool {
        correlation > self.lower() && correlation < self.upper()
    }
}

/// Keep only the candidates whose recorded correlation still qualifies.
/// Returns how many were dropped.
pub fn retain_qualifying(candidates: &mut Vec<InteractionCandidate>, band: &AcceptanceBand) -> usize {
    let before = candidates.len();
    candidates.retain(|c| band.qualifies(c.exact_correlation));
    before - candidates.len()
}
