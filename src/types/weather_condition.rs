//! Defines the normalized [`WeatherCondition`] record and the [`WeatherIcon`] categories
//! that free-text summaries are classified into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The icon category derived from a descriptive weather summary.
///
/// Providers describe conditions in prose ("Mainly cloudy", "Chance of showers").
/// The text pipeline maps those descriptions onto this closed set. Text without
/// any recognized keyword maps to [`WeatherIcon::Sunny`].
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherIcon {
    /// Clear skies, or no recognizable weather keyword.
    #[default]
    Sunny,
    /// Overcast or generally cloudy.
    Cloudy,
    /// A mix of sun and cloud, leaning sunny.
    PartiallyCloudy,
    /// A mix of sun and cloud, leaning cloudy.
    MostlyCloudy,
    /// Rain is expected or falling.
    Rain,
    /// Rain is possible.
    ChanceOfRain,
    /// Thunder, lightning or storms.
    Thunderstorms,
    /// Snow or flurries.
    Snow,
    /// Fog or mist.
    Fog,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "SUNNY",
            WeatherIcon::Cloudy => "CLOUDY",
            WeatherIcon::PartiallyCloudy => "PARTIALLY_CLOUDY",
            WeatherIcon::MostlyCloudy => "MOSTLY_CLOUDY",
            WeatherIcon::Rain => "RAIN",
            WeatherIcon::ChanceOfRain => "CHANCE_OF_RAIN",
            WeatherIcon::Thunderstorms => "THUNDERSTORMS",
            WeatherIcon::Snow => "SNOW",
            WeatherIcon::Fog => "FOG",
        }
    }
}

/// Formats the icon using its wire name.
///
/// # Examples
///
/// ```
/// use weatherd::WeatherIcon;
///
/// assert_eq!(WeatherIcon::ChanceOfRain.to_string(), "CHANCE_OF_RAIN");
/// ```
impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized snapshot of the weather, either observed or forecasted.
///
/// Numeric fields are zero when the source text doesn't mention them. A zero
/// value can therefore mean "reported as zero" or "not reported at all".
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// The provider's own short description (e.g. "Mainly cloudy").
    pub summary: String,
    /// The icon category derived from `summary`.
    pub summary_icon: WeatherIcon,
    /// Air temperature in degrees Celsius.
    pub temperature: f32,
    /// Station pressure in kilopascals.
    pub pressure: f32,
    /// Visibility in whole kilometres.
    pub visibility: i32,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Wind chill in degrees Celsius.
    pub wind_chill: f32,
    /// Dew point in degrees Celsius.
    pub dew_point: f32,
    /// Sustained wind speed in km/h.
    pub wind_speed: i32,
    /// UV index.
    pub uv_index: i32,
}
