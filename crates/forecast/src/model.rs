use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::series::DailySeries;
use crate::stats::{mean, stddev_sample};

/// Fitted moving-average + linear-trend baseline. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    /// Number of trailing days the average/deviation were computed over.
    pub window_size: usize,
    pub moving_average: f64,
    pub residual_std: f64,
    /// Whole-series endpoint slope per day (not a regression).
    pub trend_per_period: f64,
}

/// Fits the baseline model for a given horizon.
#[derive(Debug, Copy, Clone)]
pub struct ForecastModel;

impl ForecastModel {
    /// Nominal window for a horizon, before clamping to the series length.
    /// First match wins: weekly, monthly, quarterly, yearly.
    pub fn nominal_window(horizon_days: usize) -> usize {
        if horizon_days <= 7 {
            7
        } else if horizon_days <= 30 {
            30
        } else if horizon_days <= 90 {
            90
        } else {
            365
        }
    }

    /// Fit the baseline over the trailing window.
    ///
    /// `moving_average`/`residual_std` come from the last
    /// `min(nominal_window, len)` quantities; `trend_per_period` is the
    /// endpoint slope over the **entire** series, a deliberate
    /// simplification kept from the reference behavior.
    pub fn fit(series: &DailySeries, horizon_days: usize) -> ForecastResult<FittedModel> {
        if series.is_empty() {
            return Err(ForecastError::insufficient_data(
                "cannot fit a model on an empty series",
            ));
        }

        let window_size = Self::nominal_window(horizon_days).min(series.len());
        let quantities: Vec<f64> = series.quantities().collect();
        let tail = &quantities[quantities.len() - window_size..];

        let moving_average = mean(tail);
        let residual_std = stddev_sample(tail, moving_average);

        let trend_per_period = if quantities.len() > 1 {
            let first = quantities[0];
            let last = quantities[quantities.len() - 1];
            (last - first) / (quantities.len() as f64)
        } else {
            0.0
        };

        Ok(FittedModel {
            window_size,
            moving_average,
            residual_std,
            trend_per_period,
        })
    }
}
