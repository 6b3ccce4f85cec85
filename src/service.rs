//! The query entry point: maps a coordinate to the nearest registered station
//! and returns that station's current report or forecast.

use crate::config::{Provider, ServiceConfig};
use crate::error::WeatherError;
use crate::providers::envcan::EnvCanStation;
use crate::providers::fetch::HttpFetcher;
use crate::providers::noaa::NoaaStation;
use crate::stations::error::StationError;
use crate::stations::geo_set::GeoSet;
use crate::stations::station::Station;
use crate::types::report::{WeatherForecast, WeatherReport};
use bon::bon;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weatherd::LatLon;
///
/// let waterloo = LatLon(43.4643, -80.5204);
/// assert_eq!(waterloo.0, 43.4643); // Latitude
/// assert_eq!(waterloo.1, -80.5204); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A station's current report together with the name of the station that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReport {
    pub station_name: String,
    pub report: WeatherReport,
}

/// Answers weather queries for arbitrary coordinates.
///
/// Stations are registered up front (`&mut self`); once the service is shared
/// (typically behind an `Arc`) it only serves queries. Every query is routed to
/// the single closest station by great-circle distance, and is bounded by the
/// service's query timeout.
///
/// # Examples
///
/// ```rust
/// # use weatherd::{WeatherService, WeatherError, LatLon};
/// # async fn run() -> Result<(), WeatherError> {
/// let service = WeatherService::builder().build();
///
/// // Nothing registered yet.
/// let result = service.get_current_report(LatLon(43.47, -80.54)).await;
/// assert!(matches!(result, Err(WeatherError::LocationNotFound)));
/// # Ok(())
/// # }
/// ```
pub struct WeatherService {
    stations: GeoSet<Arc<dyn Station>>,
    query_timeout: Duration,
}

#[bon]
impl WeatherService {
    /// Creates an empty service.
    ///
    /// # Arguments
    ///
    /// * `query_timeout` - Upper bound on a single query, including any refresh it triggers.
    ///                     Defaults to [`DEFAULT_QUERY_TIMEOUT`].
    #[builder]
    pub fn new(#[builder(default = DEFAULT_QUERY_TIMEOUT)] query_timeout: Duration) -> Self {
        Self {
            stations: GeoSet::new(),
            query_timeout,
        }
    }

    /// Builds a service and registers every station listed in `config`.
    ///
    /// All stations share one HTTP client configured with the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Fetch`] if the HTTP client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, WeatherError> {
        let fetcher = HttpFetcher::new(config.request_timeout())?;
        let mut service = Self::builder()
            .query_timeout(config.query_timeout())
            .build();

        for station in &config.stations {
            let adapter: Arc<dyn Station> = match station.provider {
                Provider::EnvCan => Arc::new(
                    EnvCanStation::builder()
                        .name(station.name.as_str())
                        .latitude(station.latitude)
                        .longitude(station.longitude)
                        .url(station.url.as_str())
                        .fetcher(fetcher.clone())
                        .refresh_interval(config.refresh_interval())
                        .build()?,
                ),
                Provider::Noaa => Arc::new(
                    NoaaStation::builder()
                        .name(station.name.as_str())
                        .latitude(station.latitude)
                        .longitude(station.longitude)
                        .url(station.url.as_str())
                        .fetcher(fetcher.clone())
                        .refresh_interval(config.refresh_interval())
                        .build()?,
                ),
            };
            service.register_station(adapter);
        }

        Ok(service)
    }

    /// Adds a station, indexed under its own coordinates.
    ///
    /// Registering the same coordinates twice is allowed; the earlier station
    /// keeps winning queries for that spot.
    pub fn register_station(&mut self, station: Arc<dyn Station>) {
        info!(
            "Registering station '{}' at ({}, {})",
            station.name(),
            station.latitude(),
            station.longitude()
        );
        self.stations
            .add(station.latitude(), station.longitude(), station);
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Returns the current report of the station closest to `location`.
    ///
    /// # Errors
    ///
    /// * [`WeatherError::LocationNotFound`] when no station is registered.
    /// * [`WeatherError::Timeout`] when the station doesn't answer within the query timeout.
    /// * [`WeatherError::Station`] when the station's refresh fails.
    pub async fn get_current_report(&self, location: LatLon) -> Result<CurrentReport, WeatherError> {
        let station = self.closest_station(location)?;
        let report = tokio::time::timeout(self.query_timeout, station.get_report())
            .await
            .map_err(|_| self.timed_out(station.as_ref()))?
            .map_err(|source| failed(station.as_ref(), source))?;

        Ok(CurrentReport {
            station_name: station.name().to_string(),
            report,
        })
    }

    /// Returns the forecast of the station closest to `location`, in feed order.
    ///
    /// The list may be empty for providers without narrative forecasts.
    ///
    /// # Errors
    ///
    /// Same as [`WeatherService::get_current_report`].
    pub async fn get_forecast(&self, location: LatLon) -> Result<Vec<WeatherForecast>, WeatherError> {
        let station = self.closest_station(location)?;
        tokio::time::timeout(self.query_timeout, station.get_forecast())
            .await
            .map_err(|_| self.timed_out(station.as_ref()))?
            .map_err(|source| failed(station.as_ref(), source))
    }

    fn closest_station(&self, location: LatLon) -> Result<&Arc<dyn Station>, WeatherError> {
        self.stations
            .closest(location.0, location.1)
            .ok_or(WeatherError::LocationNotFound)
    }

    fn timed_out(&self, station: &dyn Station) -> WeatherError {
        info!(
            "Station '{}' timed out after {:?}",
            station.name(),
            self.query_timeout
        );
        WeatherError::Timeout {
            station: station.name().to_string(),
            timeout: self.query_timeout,
        }
    }
}

fn failed(station: &dyn Station, source: StationError) -> WeatherError {
    info!("Station '{}' failed: {}", station.name(), source);
    WeatherError::Station {
        station: station.name().to_string(),
        source,
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::builder().build()
    }
}
