use thiserror::Error;

/// Errors raised while building or driving a [`Screener`](crate::screener::Screener).
///
/// Non-finite intermediate values (e.g. a division by a zero-valued column) are
/// *not* errors: they yield a NaN correlation which never qualifies.
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// Input data or parameters rejected at construction time.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two sequences that must be row-aligned have different lengths.
    #[error("shape mismatch: expected {expected} rows, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A feature table was given the same column name twice.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A held-out table lacks a column named by an accepted interaction.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Held-out validation requested before `screen_pairs`.
    #[error("baseline correlations not computed yet; run screen_pairs first")]
    NotScreened,

    /// No held-out set was attached to the screener.
    #[error("no held-out set attached")]
    NoHoldout,

    /// Configuration JSON could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
