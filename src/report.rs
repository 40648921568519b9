//! Programmatic counterparts of everything the screener logs.

use serde::{Deserialize, Serialize};

use crate::interaction::{CorrelationMode, InteractionOperator};

/// Correlation of a single original feature with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineCorrelation {
    pub feature: String,
    pub correlation: f64,
}

/// Extremes of the per-feature correlations. NaN when no feature had a
/// finite correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineBounds {
    pub corr_min: f64,
    pub corr_max: f64,
}

/// Progress event emitted while screening pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenProgress {
    /// Pairs evaluated so far, including the current one.
    pub processed: usize,
    pub total: usize,
}

impl ScreenProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Events are emitted every `⌊total / 10⌋` pairs, or every pair below ten.
pub fn progress_step(total: usize) -> usize {
    (total / 10).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub corr_mode: CorrelationMode,
    pub interaction: InteractionOperator,
    pub bounds: BaselineBounds,
    pub baseline: Vec<BaselineCorrelation>,
    pub pairs_evaluated: usize,
    pub accepted: usize,
}

/// An accepted pair whose held-out correlation fell back inside the band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutFlag {
    pub feature_a: String,
    pub feature_b: String,
    /// Held-out correlation, unrounded.
    pub correlation: f64,
    pub removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldoutReport {
    pub checked: usize,
    pub flags: Vec<HoldoutFlag>,
    pub removed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_step_never_zero() {
        assert_eq!(progress_step(0), 1);
        assert_eq!(progress_step(3), 1);
        assert_eq!(progress_step(10), 1);
        assert_eq!(progress_step(45), 4);
        assert_eq!(progress_step(66), 6);
    }

    #[test]
    fn progress_fraction() {
        let p = ScreenProgress { processed: 5, total: 20 };
        assert_eq!(p.fraction(), 0.25);
        assert_eq!(ScreenProgress { processed: 0, total: 0 }.fraction(), 1.0);
    }
}
