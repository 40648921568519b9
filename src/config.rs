//! Screener configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenerError};
use crate::interaction::{CorrelationMode, InteractionOperator};

/// Parameters that stay fixed for the lifetime of a screener, except `margin`
/// which can be tightened afterwards with `Screener::change_margin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Extra distance a derived correlation must clear beyond the baseline band.
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Log progress while screening pairs.
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    #[serde(default)]
    pub corr_mode: CorrelationMode,

    #[serde(default)]
    pub interaction: InteractionOperator,
}

fn default_margin() -> f64 {
    0.01
}
fn default_verbose() -> bool {
    true
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            verbose: default_verbose(),
            corr_mode: CorrelationMode::default(),
            interaction: InteractionOperator::default(),
        }
    }
}

impl ScreenerConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScreenerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_corr_mode(mut self, mode: CorrelationMode) -> Self {
        self.corr_mode = mode;
        self
    }

    pub fn with_interaction(mut self, op: InteractionOperator) -> Self {
        self.interaction = op;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_margin(self.margin)
    }
}

pub(crate) fn check_margin(margin: f64) -> Result<()> {
    if !margin.is_finite() || margin < 0.0 {
        return Err(ScreenerError::InvalidInput(format!(
            "margin must be a non-negative finite number, got {margin}"
        )));
    }
    Ok(())
}
