use std::sync::RwLock;

use chrono::NaiveDate;

use demandcast_core::{DateRange, DimensionFilters};

use crate::observation::RawObservation;
use crate::r#trait::{StoreError, TransactionStore};

/// In-memory transaction store.
///
/// Intended for tests/dev. Not optimized for performance: fetches scan the
/// whole row set.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    rows: RwLock<Vec<RawObservation>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observations(rows: Vec<RawObservation>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn insert(&self, row: RawObservation) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        rows.push(row);
        Ok(())
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn fetch_observations(
        &self,
        range: DateRange,
        filters: &DimensionFilters,
    ) -> Result<Vec<RawObservation>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut matched: Vec<RawObservation> = rows
            .iter()
            .filter(|r| range.contains(r.date) && filters.matches(&r.dimensions))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.date);

        Ok(matched)
    }

    fn latest_observation_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(rows.iter().map(|r| r.date).max())
    }
}
