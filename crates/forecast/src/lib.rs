//! `demandcast-forecast`
//!
//! **Responsibility:** the demand/revenue forecasting engine.
//!
//! - Assembles a gap-free daily series from sparse transaction rows.
//! - Fits a windowed moving-average + linear-trend baseline.
//! - Projects it forward with dampened stochastic variation and 95% bounds.
//! - Back-evaluates the baseline and assembles the caller-facing report.
//!
//! Everything here is request-scoped: one orchestrator call produces one
//! self-contained set of artifacts, nothing is cached, and output is
//! deterministic under an explicit random seed.

pub mod error;
pub mod evaluate;
pub mod generate;
pub mod model;
pub mod orchestrator;
pub mod patterns;
pub mod series;
mod stats;

pub use error::{ForecastError, ForecastResult};
pub use evaluate::{EvaluationResult, ModelEvaluator};
pub use generate::{ForecastGenerator, ForecastRow, rng_for_seed};
pub use model::{FittedModel, ForecastModel};
pub use orchestrator::{ForecastOrchestrator, ForecastOutcome, ForecastReport, RevenueMetrics};
pub use patterns::{PatternDetector, SeriesStatistics};
pub use series::{DailyPoint, DailySeries, TimeSeriesAssembler};
