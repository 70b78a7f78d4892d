use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use demandcast_core::ConfigError;

use crate::error::{ForecastError, ForecastResult};
use crate::model::FittedModel;
use crate::series::DailySeries;

/// z-value applied to prediction intervals. The configuration accepts a
/// confidence level for forward compatibility, but only 95% is applied.
const CONFIDENCE_Z: f64 = 1.96;

/// Noise deviation dampening, to keep the projection from jittering as hard
/// as the raw residuals.
const NOISE_DAMPENING: f64 = 0.5;

/// One forecast day.
///
/// Bounds are `None` when prediction intervals were not requested. Lower
/// bounds are not floored at zero; only the point forecast is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub quantity: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub revenue: f64,
    pub revenue_lower: Option<f64>,
    pub revenue_upper: Option<f64>,
}

/// Build the random source for a request.
///
/// An explicit seed makes the projection byte-identical across runs; without
/// one the source is drawn from OS entropy.
pub fn rng_for_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Projects a fitted model forward with dampened stochastic variation.
#[derive(Debug, Copy, Clone)]
pub struct ForecastGenerator;

impl ForecastGenerator {
    /// Project `horizon_days` forward from the series' last date.
    ///
    /// For step i: `quantity = max(0, moving_average + trend·i + noise)`
    /// with `noise ~ Normal(0, residual_std · 0.5)`. Revenue columns scale
    /// every quantity column by the series' average historical price per
    /// unit. Rows start the day after the last observed date and are
    /// strictly consecutive.
    pub fn project(
        model: &FittedModel,
        series: &DailySeries,
        horizon_days: usize,
        intervals: bool,
        confidence_level: f64,
        rng: &mut impl Rng,
    ) -> ForecastResult<Vec<ForecastRow>> {
        let Some(last) = series.last() else {
            return Err(ForecastError::insufficient_data(
                "cannot project from an empty series",
            ));
        };

        tracing::debug!(
            horizon_days,
            intervals,
            confidence_level,
            window = model.window_size,
            "projecting baseline forward"
        );

        let noise_std = model.residual_std * NOISE_DAMPENING;
        let noise = if noise_std > 0.0 {
            Some(Normal::new(0.0, noise_std).map_err(|e| {
                ForecastError::insufficient_data(format!("residual deviation unusable: {e}"))
            })?)
        } else {
            None
        };

        let price = series.average_price_per_unit();

        let mut rows = Vec::with_capacity(horizon_days);
        let mut date = last.date;
        for step in 1..=horizon_days {
            date = date.succ_opt().ok_or_else(|| {
                ConfigError::malformed_range("forecast window exceeds the supported calendar")
            })?;

            let trend_component = model.trend_per_period * (step as f64);
            let variation = noise.as_ref().map_or(0.0, |n| n.sample(rng));
            let quantity = (model.moving_average + trend_component + variation).max(0.0);

            let (lower_bound, upper_bound) = if intervals {
                (
                    Some(quantity - CONFIDENCE_Z * model.residual_std),
                    Some(quantity + CONFIDENCE_Z * model.residual_std),
                )
            } else {
                (None, None)
            };

            rows.push(ForecastRow {
                date,
                quantity,
                lower_bound,
                upper_bound,
                revenue: quantity * price,
                revenue_lower: lower_bound.map(|v| v * price),
                revenue_upper: upper_bound.map(|v| v * price),
            });
        }

        Ok(rows)
    }
}
