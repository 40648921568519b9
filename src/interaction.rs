use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;
use crate::stats;

// ---------------------------------------------------------------------------
// CorrelationMode
// ---------------------------------------------------------------------------

/// How a column is correlated with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMode {
    /// Product-moment correlation. Requires standardized feature columns.
    #[default]
    Pearson,
    /// Rank correlation.
    Spearman,
}

impl CorrelationMode {
    pub fn correlate(self, values: &[f64], target: &[f64]) -> f64 {
        match self {
            CorrelationMode::Pearson => stats::pearson(values, target),
            CorrelationMode::Spearman => stats::spearman(values, target),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationMode::Pearson => "pearson",
            CorrelationMode::Spearman => "spearman",
        }
    }
}

impl fmt::Display for CorrelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMode {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMode::Pearson),
            "spearman" => Ok(CorrelationMode::Spearman),
            other => Err(ScreenerError::InvalidInput(format!(
                "unknown correlation mode '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionOperator
// ---------------------------------------------------------------------------

/// Elementwise operator combining two feature columns into a derived one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionOperator {
    #[default]
    #[serde(rename = "*", alias = "multiply")]
    Multiply,
    #[serde(rename = "/", alias = "divide")]
    Divide,
    #[serde(rename = "+", alias = "add")]
    Add,
    #[serde(rename = "-", alias = "subtract")]
    Subtract,
}

impl InteractionOperator {
    pub const ALL: [InteractionOperator; 4] = [
        InteractionOperator::Multiply,
        InteractionOperator::Divide,
        InteractionOperator::Add,
        InteractionOperator::Subtract,
    ];

    /// Combine two values. Division by zero yields a non-finite value.
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            InteractionOperator::Multiply => a * b,
            InteractionOperator::Divide => a / b,
            InteractionOperator::Add => a + b,
            InteractionOperator::Subtract => a - b,
        }
    }

    /// Derived column `a ∘ b`. Callers guarantee equal lengths.
    pub fn apply(self, a: &[f64], b: &[f64]) -> Vec<f64> {
        a.iter().zip(b).map(|(&x, &y)| self.combine(x, y)).collect()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            InteractionOperator::Multiply => "*",
            InteractionOperator::Divide => "/",
            InteractionOperator::Add => "+",
            InteractionOperator::Subtract => "-",
        }
    }
}

impl fmt::Display for InteractionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for InteractionOperator {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" | "multiply" => Ok(InteractionOperator::Multiply),
            "/" | "divide" => Ok(InteractionOperator::Divide),
            "+" | "add" => Ok(InteractionOperator::Add),
            "-" | "subtract" => Ok(InteractionOperator::Subtract),
            other => Err(ScreenerError::InvalidInput(format!(
                "unknown interaction operator '{other}'"
            ))),
        }
    }
}
