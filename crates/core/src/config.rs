//! Request configuration surface.
//!
//! The engine used to be driven by loosely-typed keyword/filter dictionaries;
//! everything callers can ask for is now an explicit structure.

use core::str::FromStr;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How far forward a forecast request looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonPeriod {
    Week,
    Month,
    Quarter,
    Year,
}

impl HorizonPeriod {
    /// Number of daily forecast steps the period maps to.
    pub fn days(&self) -> usize {
        match self {
            HorizonPeriod::Week => 7,
            HorizonPeriod::Month => 30,
            HorizonPeriod::Quarter => 90,
            HorizonPeriod::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HorizonPeriod::Week => "week",
            HorizonPeriod::Month => "month",
            HorizonPeriod::Quarter => "quarter",
            HorizonPeriod::Year => "year",
        }
    }
}

impl core::fmt::Display for HorizonPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HorizonPeriod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(HorizonPeriod::Week),
            "month" => Ok(HorizonPeriod::Month),
            "quarter" => Ok(HorizonPeriod::Quarter),
            "year" => Ok(HorizonPeriod::Year),
            other => Err(ConfigError::unknown_horizon(other)),
        }
    }
}

/// Dimension filters applied when fetching transaction rows.
///
/// Keys name store dimensions (e.g. `product`, `region`); a row matches when
/// every entry is present in the row's dimension keys with the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionFilters(BTreeMap<String, String>);

impl DimensionFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether a row with the given dimension keys satisfies every filter.
    pub fn matches(&self, dimensions: &BTreeMap<String, String>) -> bool {
        self.0
            .iter()
            .all(|(k, v)| dimensions.get(k).is_some_and(|actual| actual == v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One forecast request, fully specified.
///
/// `start_date`/`end_date` override the default window (latest observed date
/// minus the standard lookback). `confidence_level` is accepted for forward
/// compatibility but the generator currently applies the 95% z-value only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub horizon: HorizonPeriod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub filters: DimensionFilters,
    pub confidence: bool,
    pub confidence_level: f64,
    pub random_seed: Option<u64>,
    /// When set, evaluation refits on the series minus the final `n` days and
    /// scores on that held-out tail instead of in-sample.
    pub holdout_days: Option<usize>,
}

impl ForecastConfig {
    pub fn new(horizon: HorizonPeriod) -> Self {
        Self {
            horizon,
            start_date: None,
            end_date: None,
            filters: DimensionFilters::none(),
            confidence: true,
            confidence_level: 0.95,
            random_seed: None,
            holdout_days: None,
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters = self.filters.with(key, value);
        self
    }

    pub fn with_confidence(mut self, enabled: bool) -> Self {
        self.confidence = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_holdout_days(mut self, days: usize) -> Self {
        self.holdout_days = Some(days);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_keywords_map_to_days() {
        assert_eq!("week".parse::<HorizonPeriod>().unwrap().days(), 7);
        assert_eq!("month".parse::<HorizonPeriod>().unwrap().days(), 30);
        assert_eq!("quarter".parse::<HorizonPeriod>().unwrap().days(), 90);
        assert_eq!("year".parse::<HorizonPeriod>().unwrap().days(), 365);
    }

    #[test]
    fn horizon_parse_is_case_insensitive() {
        assert_eq!("Quarter".parse::<HorizonPeriod>().unwrap(), HorizonPeriod::Quarter);
        assert_eq!(" WEEK ".parse::<HorizonPeriod>().unwrap(), HorizonPeriod::Week);
    }

    #[test]
    fn horizon_rejects_unknown_keyword() {
        let err = "fortnight".parse::<HorizonPeriod>().unwrap_err();
        match err {
            ConfigError::UnknownHorizon(kw) => assert_eq!(kw, "fortnight"),
            _ => panic!("expected UnknownHorizon"),
        }
    }

    #[test]
    fn filters_match_requires_every_entry() {
        let filters = DimensionFilters::none()
            .with("product", "P-100")
            .with("region", "EMEA");

        let mut row = BTreeMap::new();
        row.insert("product".to_string(), "P-100".to_string());
        row.insert("region".to_string(), "EMEA".to_string());
        row.insert("channel".to_string(), "web".to_string());
        assert!(filters.matches(&row));

        row.insert("region".to_string(), "APAC".to_string());
        assert!(!filters.matches(&row));

        row.remove("region");
        assert!(!filters.matches(&row));
    }

    #[test]
    fn empty_filters_match_anything() {
        assert!(DimensionFilters::none().matches(&BTreeMap::new()));
    }

    #[test]
    fn config_defaults() {
        let config = ForecastConfig::new(HorizonPeriod::Month);
        assert!(config.confidence);
        assert_eq!(config.confidence_level, 0.95);
        assert!(config.start_date.is_none());
        assert!(config.random_seed.is_none());
        assert!(config.holdout_days.is_none());
        assert!(config.filters.is_empty());
    }
}
