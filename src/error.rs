use crate::config::ConfigError;
use crate::providers::fetch::FetchError;
use crate::stations::error::StationError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No weather station is registered")]
    LocationNotFound,

    #[error("Station '{station}' did not answer within {timeout:?}")]
    Timeout { station: String, timeout: Duration },

    #[error("Station '{station}' failed")]
    Station {
        station: String,
        #[source]
        source: StationError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
