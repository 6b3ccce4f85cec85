mod config;
mod discovery;
mod error;
mod providers;
mod service;
mod stations;
mod text;
mod types;

pub use config::{default_config_path, ConfigError, Provider, ServiceConfig, StationConfig};
pub use error::WeatherError;
pub use service::*;

pub use discovery::crawler::{
    city_from_title, DiscoveredStation, StationCrawler, DEFAULT_BASE_URL, DEFAULT_MAX_INDEX,
};
pub use discovery::province_codes::ProvinceCodes;

pub use providers::envcan::{parse_feed_items, EnvCanStation};
pub use providers::feed::{decode_feed, FeedDocument, FeedError, FeedItem};
pub use providers::fetch::{FetchError, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
pub use providers::noaa::NoaaStation;

pub use stations::cache::{RefreshCache, StationSnapshot, DEFAULT_REFRESH_INTERVAL};
pub use stations::error::StationError;
pub use stations::geo_set::{distance_m, GeoSet};
pub use stations::station::{Station, StationInfo};

pub use text::current_conditions::parse_current_conditions;
pub use text::error::DateError;
pub use text::forecast_narrative::parse_forecast_narrative;
pub use text::icon::icon_from_text;
pub use text::numeric::last_number;
pub use text::relative_date::{
    forecast_time_for_title, resolve_relative_day, DAY_SLOT_HOUR, NIGHT_SLOT_HOUR,
};

pub use types::report::{WeatherForecast, WeatherReport};
pub use types::weather_condition::{WeatherCondition, WeatherIcon};
