//! Configuration error model.

use thiserror::Error;

/// Result type used for configuration parsing/validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Deterministic configuration failure.
///
/// Keep this focused on request-shaping problems (unknown vocabulary,
/// malformed windows). Store and model failures belong to their own layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A horizon keyword outside the supported vocabulary.
    #[error("unknown horizon period: {0} (expected week, month, quarter or year)")]
    UnknownHorizon(String),

    /// A date window that cannot describe a calendar span.
    #[error("malformed date range: {0}")]
    MalformedRange(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ConfigError {
    pub fn unknown_horizon(keyword: impl Into<String>) -> Self {
        Self::UnknownHorizon(keyword.into())
    }

    pub fn malformed_range(msg: impl Into<String>) -> Self {
        Self::MalformedRange(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
