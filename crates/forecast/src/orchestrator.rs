use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use demandcast_core::{DateRange, DimensionFilters, ForecastConfig, HorizonPeriod, RequestId};
use demandcast_store::TransactionStore;

use crate::error::{ForecastError, ForecastResult};
use crate::evaluate::{EvaluationResult, ModelEvaluator};
use crate::generate::{ForecastGenerator, ForecastRow, rng_for_seed};
use crate::model::{FittedModel, ForecastModel};
use crate::patterns::{PatternDetector, SeriesStatistics};
use crate::series::{DailySeries, TimeSeriesAssembler};

/// Default request window: this many days back from the latest observation.
const DEFAULT_LOOKBACK_DAYS: u64 = 90;

/// Revenue summary over the forecast rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetrics {
    pub total_forecast_revenue: f64,
    pub average_daily_revenue: f64,
    /// Growth between the first and last forecast day, in percent.
    /// 0.0 when the first day forecasts no revenue.
    pub revenue_growth_pct: f64,
    pub average_price_per_unit: f64,
}

impl RevenueMetrics {
    fn from_rows(rows: &[ForecastRow], average_price_per_unit: f64) -> Self {
        let total_forecast_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
        let average_daily_revenue = if rows.is_empty() {
            0.0
        } else {
            total_forecast_revenue / (rows.len() as f64)
        };
        let revenue_growth_pct = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) if first.revenue > 0.0 => {
                (last.revenue - first.revenue) / first.revenue * 100.0
            }
            _ => 0.0,
        };

        Self {
            total_forecast_revenue,
            average_daily_revenue,
            revenue_growth_pct,
            average_price_per_unit,
        }
    }
}

/// Everything one successful forecast request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub request_id: RequestId,
    pub generated_at: DateTime<Utc>,
    /// The historical window that was inspected for the fit.
    pub range: DateRange,
    pub horizon: HorizonPeriod,
    pub rows: Vec<ForecastRow>,
    pub model: FittedModel,
    pub statistics: SeriesStatistics,
    pub evaluation: EvaluationResult,
    pub revenue: RevenueMetrics,
}

/// Caller-visible outcome of a forecast request.
///
/// An empty window is an answer, not a failure: it comes back as `NoData`
/// with the window that was inspected (`None` when the store holds nothing
/// at all and no window was given).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Forecast(ForecastReport),
    NoData { range: Option<DateRange> },
}

/// Wires the engine stages together per request.
///
/// Owns nothing but the injected store handle; every call produces a fresh,
/// self-contained report, so independent requests may run concurrently
/// without coordination.
#[derive(Debug, Clone)]
pub struct ForecastOrchestrator<S> {
    store: S,
}

impl<S> ForecastOrchestrator<S>
where
    S: TransactionStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one forecast request end to end.
    ///
    /// Stage order: resolve window, fetch, assemble, detect patterns, fit,
    /// project, evaluate, summarize. Every stage failure converts into a
    /// typed [`crate::ForecastError`]; absence of data converts into
    /// [`ForecastOutcome::NoData`].
    pub fn generate_forecast(&self, config: &ForecastConfig) -> ForecastResult<ForecastOutcome> {
        let request_id = RequestId::new();
        let span = tracing::info_span!("generate_forecast", %request_id, horizon = %config.horizon);
        let _guard = span.enter();

        let Some(range) = self.resolve_range(config)? else {
            tracing::warn!("store holds no observations and no window was given");
            return Ok(ForecastOutcome::NoData { range: None });
        };

        let series = match self.assemble_series(range, &config.filters) {
            Ok(series) => series,
            Err(ForecastError::DataUnavailable { range }) => {
                tracing::warn!(%range, "no observations in the requested window");
                return Ok(ForecastOutcome::NoData { range: Some(range) });
            }
            Err(other) => return Err(other),
        };

        let statistics = PatternDetector::detect(&series);

        let horizon_days = config.horizon.days();
        let model = ForecastModel::fit(&series, horizon_days)?;
        tracing::debug!(
            window = model.window_size,
            moving_average = model.moving_average,
            residual_std = model.residual_std,
            trend_per_period = model.trend_per_period,
            "fitted baseline model"
        );

        let mut rng = rng_for_seed(config.random_seed);
        let rows = ForecastGenerator::project(
            &model,
            &series,
            horizon_days,
            config.confidence,
            config.confidence_level,
            &mut rng,
        )?;

        let evaluation = self.evaluate(&model, &series, config, horizon_days)?;
        let revenue = RevenueMetrics::from_rows(&rows, series.average_price_per_unit());

        Ok(ForecastOutcome::Forecast(ForecastReport {
            request_id,
            generated_at: Utc::now(),
            range,
            horizon: config.horizon,
            rows,
            model,
            statistics,
            evaluation,
            revenue,
        }))
    }

    /// Fetch and assemble the daily series for a window.
    ///
    /// A window with no matching rows is [`ForecastError::DataUnavailable`];
    /// the public entry point recovers that into a no-data outcome.
    fn assemble_series(
        &self,
        range: DateRange,
        filters: &DimensionFilters,
    ) -> ForecastResult<DailySeries> {
        let observations = self.store.fetch_observations(range, filters)?;
        tracing::info!(rows = observations.len(), %range, "fetched transaction rows");

        let series = TimeSeriesAssembler::assemble(&observations);
        if series.is_empty() {
            return Err(ForecastError::DataUnavailable { range });
        }
        Ok(series)
    }

    /// Resolve the historical window for a request.
    ///
    /// End defaults to the latest observed date; start defaults to the
    /// standard lookback before the end. `Ok(None)` means the store is empty
    /// and no end was given — there is nothing to look at.
    fn resolve_range(&self, config: &ForecastConfig) -> ForecastResult<Option<DateRange>> {
        let end = match config.end_date {
            Some(end) => end,
            None => match self.store.latest_observation_date()? {
                Some(latest) => latest,
                None => return Ok(None),
            },
        };

        let range = match config.start_date {
            Some(start) => DateRange::new(start, end)?,
            None => DateRange::lookback_from(end, DEFAULT_LOOKBACK_DAYS)?,
        };
        Ok(Some(range))
    }

    /// Score the baseline. In-sample against the fit series by default; with
    /// `holdout_days` set, refit on the training prefix and score the
    /// held-out tail instead. The published forecast is untouched either way.
    fn evaluate(
        &self,
        model: &FittedModel,
        series: &DailySeries,
        config: &ForecastConfig,
        horizon_days: usize,
    ) -> ForecastResult<EvaluationResult> {
        let Some(holdout) = config.holdout_days else {
            return ModelEvaluator::evaluate(model, series);
        };

        match series.split_holdout(holdout) {
            Some((train, test)) => {
                let holdout_model = ForecastModel::fit(&train, horizon_days)?;
                ModelEvaluator::evaluate(&holdout_model, &test)
            }
            None => {
                tracing::warn!(
                    holdout,
                    len = series.len(),
                    "holdout window does not fit the series; evaluating in-sample"
                );
                ModelEvaluator::evaluate(model, series)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use demandcast_store::{InMemoryTransactionStore, RawObservation, StoreError};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn constant_store(days: u64, quantity: f64, amount: f64) -> InMemoryTransactionStore {
        let start = d(2024, 4, 1);
        let rows = (0..days)
            .map(|i| {
                RawObservation::new(start + chrono::Duration::days(i as i64), quantity, amount)
            })
            .collect();
        InMemoryTransactionStore::with_observations(rows)
    }

    struct FailingStore;

    impl TransactionStore for FailingStore {
        fn fetch_observations(
            &self,
            _range: DateRange,
            _filters: &DimensionFilters,
        ) -> Result<Vec<RawObservation>, StoreError> {
            Err(StoreError::Query("simulated outage".to_string()))
        }

        fn latest_observation_date(&self) -> Result<Option<NaiveDate>, StoreError> {
            Ok(Some(d(2024, 4, 10)))
        }
    }

    #[test]
    fn default_window_looks_back_from_latest_observation() {
        let orchestrator = ForecastOrchestrator::new(constant_store(10, 100.0, 500.0));
        let config = ForecastConfig::new(HorizonPeriod::Week).with_seed(1);

        let outcome = orchestrator.generate_forecast(&config).unwrap();
        let ForecastOutcome::Forecast(report) = outcome else {
            panic!("expected a forecast");
        };

        assert_eq!(report.range.end(), d(2024, 4, 10));
        assert_eq!(
            report.range,
            DateRange::lookback_from(d(2024, 4, 10), 90).unwrap()
        );
    }

    #[test]
    fn empty_store_without_window_is_no_data() {
        let orchestrator = ForecastOrchestrator::new(InMemoryTransactionStore::new());
        let config = ForecastConfig::new(HorizonPeriod::Month);

        let outcome = orchestrator.generate_forecast(&config).unwrap();
        assert_eq!(outcome, ForecastOutcome::NoData { range: None });
    }

    #[test]
    fn empty_window_is_no_data_with_the_inspected_range() {
        let orchestrator = ForecastOrchestrator::new(constant_store(10, 100.0, 500.0));
        let config = ForecastConfig::new(HorizonPeriod::Month)
            .with_range(d(2023, 1, 1), d(2023, 1, 31));

        let outcome = orchestrator.generate_forecast(&config).unwrap();
        let expected = DateRange::new(d(2023, 1, 1), d(2023, 1, 31)).unwrap();
        assert_eq!(
            outcome,
            ForecastOutcome::NoData {
                range: Some(expected)
            }
        );
    }

    #[test]
    fn malformed_override_window_is_rejected() {
        let orchestrator = ForecastOrchestrator::new(constant_store(10, 100.0, 500.0));
        let config = ForecastConfig::new(HorizonPeriod::Week)
            .with_range(d(2024, 4, 10), d(2024, 4, 1));

        let err = orchestrator.generate_forecast(&config).unwrap_err();
        match err {
            crate::ForecastError::InvalidConfiguration(_) => {}
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn store_failure_surfaces_as_typed_error() {
        let orchestrator = ForecastOrchestrator::new(FailingStore);
        let config = ForecastConfig::new(HorizonPeriod::Week);

        let err = orchestrator.generate_forecast(&config).unwrap_err();
        match err {
            crate::ForecastError::Store(_) => {}
            other => panic!("expected Store, got {other:?}"),
        }
    }

    #[test]
    fn holdout_scoring_leaves_forecast_rows_unchanged() {
        let store = constant_store(20, 100.0, 500.0);
        let orchestrator = ForecastOrchestrator::new(store);

        let base = ForecastConfig::new(HorizonPeriod::Week).with_seed(99);
        let with_holdout = base.clone().with_holdout_days(5);

        let ForecastOutcome::Forecast(plain) =
            orchestrator.generate_forecast(&base).unwrap()
        else {
            panic!("expected a forecast");
        };
        let ForecastOutcome::Forecast(held) =
            orchestrator.generate_forecast(&with_holdout).unwrap()
        else {
            panic!("expected a forecast");
        };

        assert_eq!(plain.rows, held.rows);
        // Constant series: both evaluations are exact anyway.
        assert_eq!(held.evaluation.mae, 0.0);
    }

    #[test]
    fn oversized_holdout_falls_back_to_in_sample() {
        let orchestrator = ForecastOrchestrator::new(constant_store(5, 10.0, 10.0));
        let config = ForecastConfig::new(HorizonPeriod::Week)
            .with_seed(4)
            .with_holdout_days(50);

        let ForecastOutcome::Forecast(report) =
            orchestrator.generate_forecast(&config).unwrap()
        else {
            panic!("expected a forecast");
        };
        assert_eq!(report.evaluation.rmse, 0.0);
    }

    #[test]
    fn arc_shared_store_supports_concurrent_style_use() {
        let store = std::sync::Arc::new(constant_store(10, 100.0, 500.0));
        let a = ForecastOrchestrator::new(store.clone());
        let b = ForecastOrchestrator::new(store);

        let config = ForecastConfig::new(HorizonPeriod::Week).with_seed(5);
        let out_a = a.generate_forecast(&config).unwrap();
        let out_b = b.generate_forecast(&config).unwrap();

        let (ForecastOutcome::Forecast(ra), ForecastOutcome::Forecast(rb)) = (out_a, out_b)
        else {
            panic!("expected forecasts");
        };
        assert_eq!(ra.rows, rb.rows);
    }
}
