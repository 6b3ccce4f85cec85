//! NOAA / National Weather Service gridpoint data (`https://api.weather.gov/gridpoints/...`).
//!
//! The gridpoint endpoint returns a GeoJSON `Feature` whose properties are time
//! series (`{"uom": "wmoUnit:degC", "values": [{"validTime": ..., "value": ...}]}`).
//! The first value of each series is taken as the current reading.

use crate::providers::fetch::{FetchError, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
use crate::stations::cache::RefreshCache;
use crate::stations::error::StationError;
use crate::stations::station::{Station, StationInfo};
use crate::types::report::{WeatherForecast, WeatherReport};
use crate::types::weather_condition::WeatherCondition;
use async_trait::async_trait;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const FEATURE_TYPE: &str = "Feature";

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GridSeries {
    #[serde(rename = "uom", default)]
    unit_of_measure: String,
    #[serde(default)]
    values: Vec<GridValue>,
}

#[derive(Debug, Deserialize)]
struct GridValue {
    value: Option<f64>,
}

pub struct NoaaStation {
    info: StationInfo,
    fetcher: HttpFetcher,
    cache: RefreshCache,
}

#[bon]
impl NoaaStation {
    /// Creates a station backed by a NOAA gridpoint URL.
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        latitude: f64,
        longitude: f64,
        #[builder(into)] url: String,
        fetcher: Option<HttpFetcher>,
        refresh_interval: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let fetcher = match fetcher {
            Some(f) => f,
            None => HttpFetcher::new(DEFAULT_REQUEST_TIMEOUT)?,
        };
        let cache = refresh_interval.map(RefreshCache::new).unwrap_or_default();
        Ok(Self {
            info: StationInfo {
                name,
                latitude,
                longitude,
                url,
            },
            fetcher,
            cache,
        })
    }

    pub fn info(&self) -> &StationInfo {
        &self.info
    }

    async fn refresh(&self) -> Result<(WeatherReport, Vec<WeatherForecast>), StationError> {
        let bytes = self.fetcher.fetch(&self.info.url).await.inspect_err(|e| {
            warn!("Error getting feature for station '{}': {}", self.info.name, e);
        })?;

        let report = parse_feature(&self.info.url, &bytes).inspect_err(|e| {
            warn!("Error parsing feature for station '{}': {}", self.info.name, e);
        })?;

        debug!("Refreshed station '{}'", self.info.name);
        // The gridpoint feed has no narrative forecast.
        Ok((report, Vec::new()))
    }
}

#[async_trait]
impl Station for NoaaStation {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn latitude(&self) -> f64 {
        self.info.latitude
    }

    fn longitude(&self) -> f64 {
        self.info.longitude
    }

    async fn get_report(&self) -> Result<WeatherReport, StationError> {
        let snapshot = self.cache.get_or_refresh(|| self.refresh()).await?;
        Ok(snapshot.report.clone())
    }

    async fn get_forecast(&self) -> Result<Vec<WeatherForecast>, StationError> {
        let snapshot = self.cache.get_or_refresh(|| self.refresh()).await?;
        Ok(snapshot.forecasts.clone())
    }
}

/// Decodes a gridpoint feature into a report.
///
/// Missing or malformed properties leave their field at zero.
fn parse_feature(url: &str, bytes: &[u8]) -> Result<WeatherReport, StationError> {
    let feature: Feature =
        serde_json::from_slice(bytes).map_err(|source| StationError::JsonParse {
            url: url.to_string(),
            source,
        })?;

    if feature.kind != FEATURE_TYPE {
        return Err(StationError::UnexpectedPayload {
            url: url.to_string(),
            expected: FEATURE_TYPE.to_string(),
            found: feature.kind,
        });
    }

    let props = &feature.properties;
    let updated_at = props
        .get("updateTime")
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(WeatherReport {
        observation_id: feature
            .id
            .as_ref()
            .and_then(|id| id.as_str())
            .unwrap_or_default()
            .to_string(),
        condition: WeatherCondition {
            temperature: current_celsius(props, "temperature"),
            dew_point: current_celsius(props, "dewpoint"),
            humidity: current_value(props, "relativeHumidity") as i32,
            wind_speed: current_value(props, "windSpeed") as i32,
            ..Default::default()
        },
        observed_at: updated_at,
        created_at: None,
        updated_at,
    })
}

fn current_series(props: &HashMap<String, serde_json::Value>, name: &str) -> Option<(String, f64)> {
    let Some(raw) = props.get(name) else {
        info!("Property '{}' is unset", name);
        return None;
    };

    let series = match GridSeries::deserialize(raw) {
        Ok(series) => series,
        Err(e) => {
            info!("Error decoding property '{}': {}", name, e);
            return None;
        }
    };

    let value = series.values.first().and_then(|v| v.value)?;
    Some((series.unit_of_measure, value))
}

fn current_value(props: &HashMap<String, serde_json::Value>, name: &str) -> f32 {
    current_series(props, name)
        .map(|(_, value)| value as f32)
        .unwrap_or(0.0)
}

fn current_celsius(props: &HashMap<String, serde_json::Value>, name: &str) -> f32 {
    match current_series(props, name) {
        Some((unit, value)) if unit.ends_with("degF") => ((value - 32.0) * 5.0 / 9.0) as f32,
        Some((_, value)) => value as f32,
        None => 0.0,
    }
}
