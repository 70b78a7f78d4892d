use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use demandcast_core::{DateRange, DimensionFilters};

use crate::observation::RawObservation;

/// Transaction store operation error.
///
/// These are **infrastructure errors** (connectivity, query execution) as
/// opposed to configuration or model errors. The engine never retries them;
/// they surface immediately through the orchestrator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

/// Read-only, synchronous source of dated transaction rows.
///
/// ## Design principles
///
/// - **No storage assumptions**: works with the in-memory implementation
///   (tests/dev) and real relational backends alike.
/// - **Dependency-injected**: callers own the handle and pass it in; there is
///   no process-wide connector. A handle is borrowed for the scope of one
///   orchestrator call and released on every exit path.
/// - **No hidden filtering**: implementations return exactly the rows inside
///   the window that match every dimension filter, ordered by date.
pub trait TransactionStore: Send + Sync {
    /// Fetch rows with `date` inside `range` matching every filter entry,
    /// ordered by ascending date.
    fn fetch_observations(
        &self,
        range: DateRange,
        filters: &DimensionFilters,
    ) -> Result<Vec<RawObservation>, StoreError>;

    /// The most recent observation date in the source, if any.
    ///
    /// Used to resolve the default request window when the caller did not
    /// supply one.
    fn latest_observation_date(&self) -> Result<Option<NaiveDate>, StoreError>;
}

impl<S> TransactionStore for Arc<S>
where
    S: TransactionStore + ?Sized,
{
    fn fetch_observations(
        &self,
        range: DateRange,
        filters: &DimensionFilters,
    ) -> Result<Vec<RawObservation>, StoreError> {
        (**self).fetch_observations(range, filters)
    }

    fn latest_observation_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        (**self).latest_observation_date()
    }
}
