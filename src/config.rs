use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "weatherd";
const CONFIG_FILE_NAME: &str = "stations.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config")]
    Parse(#[from] serde_json::Error),

    #[error("Station '{name}' has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

/// Which adapter decodes a station's feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Environment Canada Atom feed.
    EnvCan,
    /// NOAA gridpoint JSON.
    Noaa,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub url: String,
    pub provider: Provider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub query_timeout_secs: u64,
    pub stations: Vec<StationConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30 * 60,
            request_timeout_secs: 10,
            query_timeout_secs: 30,
            stations: vec![
                StationConfig {
                    name: "Kitchener Waterloo".to_string(),
                    latitude: 43.451,
                    longitude: -80.488,
                    url: "https://weather.gc.ca/rss/weather/43.451_-80.488_e.xml".to_string(),
                    provider: Provider::EnvCan,
                },
                StationConfig {
                    name: "San Francisco".to_string(),
                    latitude: 37.7749,
                    longitude: -122.4194,
                    url: "https://api.weather.gov/gridpoints/MTR/88,126".to_string(),
                    provider: Provider::Noaa,
                },
            ],
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents)
    }

    /// Parse configuration from a JSON string. Omitted fields take their defaults.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for station in &self.stations {
            let lat_ok = (-90.0..=90.0).contains(&station.latitude);
            let lon_ok = (-180.0..=180.0).contains(&station.longitude);
            if !lat_ok || !lon_ok {
                return Err(ConfigError::InvalidCoordinates {
                    name: station.name.clone(),
                    latitude: station.latitude,
                    longitude: station.longitude,
                });
            }
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// `<config dir>/weatherd/stations.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
