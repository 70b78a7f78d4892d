//! Calendar window for a forecast request.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Inclusive calendar-day window `[start, end]`.
///
/// Validated at construction; a `DateRange` always describes at least one day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ConfigResult<Self> {
        if start > end {
            return Err(ConfigError::malformed_range(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window ending at `end` and reaching `days` back in time.
    ///
    /// This is how the default request window is derived (the latest
    /// observed date minus the standard lookback).
    pub fn lookback_from(end: NaiveDate, days: u64) -> ConfigResult<Self> {
        let start = end
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| ConfigError::malformed_range(format!(
                "cannot reach {days} days back from {end}"
            )))?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered (inclusive of both endpoints).
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl core::fmt::Display for DateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_rejects_inverted_window() {
        let err = DateRange::new(d(2024, 3, 10), d(2024, 3, 1)).unwrap_err();
        match err {
            ConfigError::MalformedRange(_) => {}
            _ => panic!("expected MalformedRange"),
        }
    }

    #[test]
    fn single_day_window_is_valid() {
        let r = DateRange::new(d(2024, 3, 1), d(2024, 3, 1)).unwrap();
        assert_eq!(r.num_days(), 1);
        assert!(r.contains(d(2024, 3, 1)));
        assert!(!r.contains(d(2024, 3, 2)));
    }

    #[test]
    fn lookback_spans_the_requested_days() {
        let r = DateRange::lookback_from(d(2024, 6, 30), 90).unwrap();
        assert_eq!(r.end(), d(2024, 6, 30));
        assert_eq!(r.start(), d(2024, 4, 1));
        assert_eq!(r.num_days(), 91);
    }
}
