use crate::types::weather_condition::WeatherIcon;

/// Classifies a free-text weather description into a [`WeatherIcon`].
///
/// Keywords are tested in a fixed order and the first match wins, so
/// "Rain or snow" is [`WeatherIcon::Snow`] and "Chance of rain" is
/// [`WeatherIcon::ChanceOfRain`]. Text with no recognized keyword is
/// treated as clear skies.
///
/// # Examples
///
/// ```
/// use weatherd::{icon_from_text, WeatherIcon};
///
/// assert_eq!(icon_from_text("Mainly cloudy"), WeatherIcon::Cloudy);
/// assert_eq!(icon_from_text("Mist"), WeatherIcon::Fog);
/// ```
pub fn icon_from_text(text: &str) -> WeatherIcon {
    let text = text.to_lowercase();
    let has = |needle: &str| text.contains(needle);

    if has("snow") || has("flurries") {
        return WeatherIcon::Snow;
    }

    if has("rain") {
        if has("chance") || has("partially") {
            return WeatherIcon::ChanceOfRain;
        } else if has("storm") || has("lightning") {
            return WeatherIcon::Thunderstorms;
        }
        return WeatherIcon::Rain;
    }

    if has("thunder") {
        return WeatherIcon::Thunderstorms;
    }

    if has("cloud") {
        if has("partially") {
            return WeatherIcon::PartiallyCloudy;
        } else if has("sun") {
            return WeatherIcon::MostlyCloudy;
        }
        return WeatherIcon::Cloudy;
    }

    if has("fog") || has("mist") {
        return WeatherIcon::Fog;
    }

    if has("sunny") && has("partially") {
        return WeatherIcon::PartiallyCloudy;
    }

    WeatherIcon::Sunny
}
