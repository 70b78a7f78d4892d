use thiserror::Error;

use demandcast_core::{ConfigError, DateRange};
use demandcast_store::StoreError;

/// Result type used across the forecasting engine.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Engine-level error.
///
/// The orchestrator is the sole translation point: whatever a stage fails
/// with ends up in one of these variants, never in a foreign error type or a
/// panic at the subsystem boundary.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No transaction rows inside the requested window.
    ///
    /// The default orchestration recovers this locally into a no-data
    /// outcome; it only surfaces when a component is called directly.
    #[error("no transaction rows available in {range}")]
    DataUnavailable { range: DateRange },

    /// A series was present but too short to fit or evaluate.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The request itself was malformed (bad horizon, bad window).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The transaction store failed. Never retried.
    #[error("transaction store failure: {0}")]
    Store(#[from] StoreError),
}

impl ForecastError {
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }
}
