use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated transaction row as supplied by the store.
///
/// The engine does not own this shape: quantity and amount are whatever the
/// source aggregated per row, and `dimensions` carries the source's key
/// columns (product, region, ...) as opaque strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    /// Units sold/moved on this row.
    pub quantity: f64,
    /// Net monetary amount for this row.
    pub amount: f64,
    /// Source dimension keys this row is attributed to.
    pub dimensions: BTreeMap<String, String>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, quantity: f64, amount: f64) -> Self {
        Self {
            date,
            quantity,
            amount,
            dimensions: BTreeMap::new(),
        }
    }

    pub fn with_dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(key.into(), value.into());
        self
    }
}
