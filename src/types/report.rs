//! Observation and forecast records produced by the provider adapters.

use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The current conditions reported by a station.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// The provider's unique id for this observation, if it has one.
    pub observation_id: String,
    pub condition: WeatherCondition,
    /// When the conditions were observed.
    pub observed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single forecast slot (e.g. "Monday night").
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub forecast_id: String,
    pub condition: WeatherCondition,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// The moment this slot describes: 12:00 for a day slot, 23:00 for a night slot.
    /// `None` when the slot's day name couldn't be resolved.
    pub forecasted_for: Option<DateTime<Utc>>,
}
