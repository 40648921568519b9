use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenerError};
use crate::stats::ColumnSummary;

/// Largest |mean| a column may have to count as standardized.
pub const MAX_ABS_MEAN: f64 = 0.1;
/// Inclusive bounds on the sample standard deviation of a standardized column.
pub const STD_RANGE: (f64, f64) = (0.9, 1.1);

// ---------------------------------------------------------------------------
// FeatureColumn – one named predictor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

impl FeatureColumn {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn summary(&self) -> ColumnSummary {
        ColumnSummary::from_data(&self.values)
    }

    /// Mean within `MAX_ABS_MEAN` of zero and std inside `STD_RANGE`.
    pub fn is_standardized(&self) -> bool {
        let s = self.summary();
        s.mean.abs() < MAX_ABS_MEAN && s.std_dev >= STD_RANGE.0 && s.std_dev <= STD_RANGE.1
    }
}

// ---------------------------------------------------------------------------
// FeatureTable – ordered, row-aligned columns
// ---------------------------------------------------------------------------

/// Ordered collection of equal-length named columns. Column order drives the
/// pair enumeration order, so it is preserved exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    /// Build a table, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<FeatureColumn>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(ScreenerError::DuplicateColumn(col.name.clone()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(ScreenerError::ShapeMismatch {
                    expected,
                    got: bad.values.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Convenience constructor from `(name, values)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: Vec<(S, Vec<f64>)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, values)| FeatureColumn::new(name, values))
                .collect(),
        )
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of the named column, or `UnknownColumn`.
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| ScreenerError::UnknownColumn(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows (0 for a table without columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of unordered pairs of distinct columns, C(n, 2).
    pub fn n_pairs(&self) -> usize {
        let n = self.columns.len();
        n * n.saturating_sub(1) / 2
    }

    /// First column failing the standardization check, if any.
    pub fn first_unstandardized(&self) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| !c.is_standardized())
    }

    pub fn ensure_rows(&self, got: usize) -> Result<()> {
        if got != self.n_rows() {
            return Err(ScreenerError::ShapeMismatch {
                expected: self.n_rows(),
                got,
            });
        }
        Ok(())
    }
}
