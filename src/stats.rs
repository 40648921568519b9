//! Correlation collaborators
//!
//! Plain functions over `f64` slices. Degenerate inputs (fewer than two rows,
//! zero variance, any non-finite value) give `f64::NAN` rather than an error, so
//! a bad derived column simply never passes an acceptance band.

use serde::{Deserialize, Serialize};

/// Pearson product-moment correlation.
///
/// r = Σ[(xi - x̄)(yi - ȳ)] / √[Σ(xi - x̄)² × Σ(yi - ȳ)²]
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return f64::NAN;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }

    // Rounding can push |r| a hair past 1 for perfectly collinear inputs.
    (covariance / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}

/// Spearman rank correlation: Pearson over average ranks (ties share the mean rank).
pub fn spearman(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return f64::NAN;
    }
    pearson(&average_ranks(a), &average_ranks(b))
}

/// 1-based ranks, ties replaced by the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Round to four decimals, the precision candidate correlations are stored at.
pub fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Location and spread of one column, used by the standardization check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnSummary {
    pub fn from_data(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: sample_std(values),
        }
    }
}
