//! The free-text normalization pipeline: turns provider prose into [`WeatherCondition`]
//! records and forecast titles into timestamps.
//!
//! [`WeatherCondition`]: crate::WeatherCondition

pub mod current_conditions;
pub mod error;
pub mod forecast_narrative;
pub mod icon;
pub mod numeric;
pub mod relative_date;
