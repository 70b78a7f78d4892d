use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::series::DailySeries;
use crate::stats::{mean, stddev_sample};

/// Descriptive and seasonal statistics for a daily series.
///
/// Diagnostic display only: the model fit never reads these. Weekday buckets
/// are Monday-first; month buckets are January-first. Buckets with no
/// observations hold 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub weekday_averages: [f64; 7],
    pub month_averages: [f64; 12],
}

impl SeriesStatistics {
    /// The statistics object for an empty series.
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
            weekday_averages: [0.0; 7],
            month_averages: [0.0; 12],
        }
    }
}

/// Computes descriptive/seasonal statistics for display.
#[derive(Debug, Copy, Clone)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(series: &DailySeries) -> SeriesStatistics {
        if series.is_empty() {
            return SeriesStatistics::empty();
        }

        let quantities: Vec<f64> = series.quantities().collect();
        let mean = mean(&quantities);
        let std = stddev_sample(&quantities, mean);
        let min = quantities.iter().copied().fold(f64::INFINITY, f64::min);
        let max = quantities.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut weekday_sums = [0.0_f64; 7];
        let mut weekday_counts = [0_usize; 7];
        let mut month_sums = [0.0_f64; 12];
        let mut month_counts = [0_usize; 12];
        for point in series.points() {
            let wd = point.date.weekday().num_days_from_monday() as usize;
            weekday_sums[wd] += point.quantity;
            weekday_counts[wd] += 1;
            let mo = point.date.month0() as usize;
            month_sums[mo] += point.quantity;
            month_counts[mo] += 1;
        }

        let mut weekday_averages = [0.0_f64; 7];
        for (avg, (sum, count)) in weekday_averages
            .iter_mut()
            .zip(weekday_sums.iter().zip(weekday_counts.iter()))
        {
            if *count > 0 {
                *avg = *sum / (*count as f64);
            }
        }
        let mut month_averages = [0.0_f64; 12];
        for (avg, (sum, count)) in month_averages
            .iter_mut()
            .zip(month_sums.iter().zip(month_counts.iter()))
        {
            if *count > 0 {
                *avg = *sum / (*count as f64);
            }
        }

        SeriesStatistics {
            mean,
            std,
            min,
            max,
            count: series.len(),
            weekday_averages,
            month_averages,
        }
    }
}
