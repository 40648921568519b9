/// Data layer: core types, acceptance filtering, and synthetic samples.
///
/// Architecture:
/// ```text
///   in-memory columns + target
///        │
///        ▼
///   ┌──────────────┐
///   │ FeatureTable │  ordered named columns, row-aligned
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  AcceptanceBand → qualifying InteractionCandidates
///   └──────────┘
/// ```
///
/// `synthetic` builds standardized tables with a planted interaction.

pub mod filter;
pub mod model;
pub mod synthetic;
