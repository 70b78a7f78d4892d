//! `demandcast-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage or model
//! concerns): request identifiers, the calendar window, the horizon
//! vocabulary, and the request configuration surface.

pub mod config;
pub mod error;
pub mod id;
pub mod range;

pub use config::{DimensionFilters, ForecastConfig, HorizonPeriod};
pub use error::{ConfigError, ConfigResult};
pub use id::RequestId;
pub use range::DateRange;
