use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use demandcast_store::RawObservation;

/// One calendar day of aggregated demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub quantity: f64,
    pub revenue: f64,
}

/// Gap-free daily demand series.
///
/// Invariant: points are in strictly increasing, consecutive calendar order
/// (no gaps, no duplicates). The only way to build a non-empty one is
/// [`TimeSeriesAssembler::assemble`], which zero-fills silent days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries {
    points: Vec<DailyPoint>,
}

impl DailySeries {
    /// The explicit empty-series marker.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&DailyPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DailyPoint> {
        self.points.last()
    }

    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.quantity)
    }

    pub fn total_quantity(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.revenue).sum()
    }

    /// Average historical price per unit over the whole series.
    ///
    /// A series that sold nothing prices at 0.0 (guarded division).
    pub fn average_price_per_unit(&self) -> f64 {
        let quantity = self.total_quantity();
        if quantity > 0.0 {
            self.total_revenue() / quantity
        } else {
            0.0
        }
    }

    /// Split off the final `holdout` days as a held-out evaluation slice.
    ///
    /// Returns `None` when the split would leave either side empty.
    pub fn split_holdout(&self, holdout: usize) -> Option<(DailySeries, DailySeries)> {
        if holdout == 0 || holdout >= self.points.len() {
            return None;
        }
        let cut = self.points.len() - holdout;
        let train = DailySeries {
            points: self.points[..cut].to_vec(),
        };
        let test = DailySeries {
            points: self.points[cut..].to_vec(),
        };
        Some((train, test))
    }
}

/// Turns raw dated transaction rows into a gap-free daily series.
#[derive(Debug, Copy, Clone)]
pub struct TimeSeriesAssembler;

impl TimeSeriesAssembler {
    /// Aggregate observations per calendar day (sum quantity, sum amount),
    /// then reindex over the full min..max span with zero-fill.
    ///
    /// Empty input yields the empty-series marker, never an error.
    pub fn assemble(observations: &[RawObservation]) -> DailySeries {
        let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for obs in observations {
            let entry = by_day.entry(obs.date).or_insert((0.0, 0.0));
            entry.0 += obs.quantity;
            entry.1 += obs.amount;
        }

        let (Some((&start, _)), Some((&end, _))) =
            (by_day.first_key_value(), by_day.last_key_value())
        else {
            return DailySeries::empty();
        };

        let mut points = Vec::with_capacity((end - start).num_days() as usize + 1);
        let mut day = start;
        while day <= end {
            let (quantity, revenue) = by_day.get(&day).copied().unwrap_or((0.0, 0.0));
            points.push(DailyPoint {
                date: day,
                quantity,
                revenue,
            });
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }

        DailySeries { points }
    }
}
