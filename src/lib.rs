//! Pairwise-interaction screening for feature engineering.
//!
//! Given standardized (or, in Spearman mode, arbitrary) continuous predictors
//! and a target, [`Screener`] proposes derived features `a ∘ b` whose
//! correlation with the target falls outside the range spanned by the single
//! features, widened by a safety margin.
//!
//! ```
//! use pair_screener::{FeatureTable, Screener, ScreenerConfig};
//!
//! let x1 = vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
//! let x2 = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
//! let y: Vec<f64> = (0..8).map(|i| 0.2 * x1[i] + 0.9 * x1[i] * x2[i]).collect();
//!
//! let features = FeatureTable::from_pairs(vec![("x1", x1), ("x2", x2)]).unwrap();
//! let mut screener = Screener::new(features, y, ScreenerConfig::default()).unwrap();
//! screener.screen_pairs();
//! assert_eq!(screener.accepted()[0].feature_b, "x2");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod report;
pub mod screener;
pub mod stats;

pub use config::ScreenerConfig;
pub use data::filter::{AcceptanceBand, InteractionCandidate};
pub use data::model::{FeatureColumn, FeatureTable};
pub use error::{Result, ScreenerError};
pub use interaction::{CorrelationMode, InteractionOperator};
pub use report::{HoldoutFlag, HoldoutReport, ScreenProgress, ScreenReport};
pub use screener::{HoldoutSet, Screener};
