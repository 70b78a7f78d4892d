use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::model::FittedModel;
use crate::series::DailySeries;

/// Accuracy of the fitted baseline against a series slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
}

/// Scores the flat moving-average baseline.
///
/// The prediction for every point is the constant `moving_average` — the
/// simplest possible reference. The default orchestration evaluates
/// in-sample; callers supplying a held-out slice get an honest score from
/// the same routine.
#[derive(Debug, Copy, Clone)]
pub struct ModelEvaluator;

impl ModelEvaluator {
    pub fn evaluate(
        model: &FittedModel,
        series: &DailySeries,
    ) -> ForecastResult<EvaluationResult> {
        if series.is_empty() {
            return Err(ForecastError::insufficient_data(
                "cannot evaluate against an empty series",
            ));
        }

        let n = series.len() as f64;
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        for quantity in series.quantities() {
            let residual = quantity - model.moving_average;
            abs_sum += residual.abs();
            sq_sum += residual * residual;
        }

        let mae = abs_sum / n;
        let mse = sq_sum / n;
        Ok(EvaluationResult {
            mae,
            mse,
            rmse: mse.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastModel;
    use crate::series::TimeSeriesAssembler;
    use chrono::NaiveDate;
    use demandcast_store::RawObservation;

    fn series_of(quantities: &[f64]) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let rows: Vec<RawObservation> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| RawObservation::new(start + chrono::Duration::days(i as i64), *q, 0.0))
            .collect();
        TimeSeriesAssembler::assemble(&rows)
    }

    #[test]
    fn constant_series_scores_zero_everywhere() {
        let series = series_of(&[50.0; 14]);
        let model = ForecastModel::fit(&series, 7).unwrap();

        let eval = ModelEvaluator::evaluate(&model, &series).unwrap();
        assert_eq!(eval.mae, 0.0);
        assert_eq!(eval.mse, 0.0);
        assert_eq!(eval.rmse, 0.0);
    }

    #[test]
    fn flat_baseline_errors_are_hand_checkable() {
        // Baseline fixed at 10 against actuals 8 and 12.
        let model = FittedModel {
            window_size: 2,
            moving_average: 10.0,
            residual_std: 0.0,
            trend_per_period: 0.0,
        };
        let series = series_of(&[8.0, 12.0]);

        let eval = ModelEvaluator::evaluate(&model, &series).unwrap();
        assert_eq!(eval.mae, 2.0);
        assert_eq!(eval.mse, 4.0);
        assert_eq!(eval.rmse, 2.0);
    }

    #[test]
    fn evaluate_rejects_empty_slice() {
        let model = FittedModel {
            window_size: 1,
            moving_average: 1.0,
            residual_std: 0.0,
            trend_per_period: 0.0,
        };
        let err = ModelEvaluator::evaluate(&model, &DailySeries::empty()).unwrap_err();
        match err {
            ForecastError::InsufficientData(_) => {}
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }
}
