use crate::stations::error::StationError;
use crate::types::report::{WeatherForecast, WeatherReport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fixed-location source of current conditions and forecasts.
///
/// Each provider adapter implements this trait. The [`crate::WeatherService`] stores
/// stations as `Arc<dyn Station>` and picks one per query by proximity.
#[async_trait]
pub trait Station: Send + Sync {
    /// Printable name of the station (e.g. "Kitchener Waterloo").
    fn name(&self) -> &str;

    fn latitude(&self) -> f64;

    fn longitude(&self) -> f64;

    /// Returns the current conditions, refreshing from upstream if the cached copy is stale.
    async fn get_report(&self) -> Result<WeatherReport, StationError>;

    /// Returns the forecast slots, refreshing from upstream if the cached copy is stale.
    async fn get_forecast(&self) -> Result<Vec<WeatherForecast>, StationError>;
}

/// The identity of a station: where it is and where its data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider-specific feed URL.
    pub url: String,
}
