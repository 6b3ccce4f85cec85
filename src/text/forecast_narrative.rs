use crate::text::icon::icon_from_text;
use crate::text::numeric::last_number;
use crate::types::weather_condition::WeatherCondition;

/// Decodes a narrative forecast into a [`WeatherCondition`].
///
/// The narrative is split into sentences on `.`. The first sentence is the summary.
/// Each following sentence is matched on its prefix (case-sensitive, first match wins):
///
/// * `Wind chill ...` sets `wind_chill` from the last number in the sentence.
/// * `Wind ...` sets `wind_speed` from the number right before `km/h`.
/// * `UV index N ...` sets `uv_index`.
/// * `High ...`, `Low ...`, `Temperature ...` set `temperature` from the last number.
///
/// Anything else (e.g. "Forecast issued 11:00 AM EST") is ignored.
///
/// # Examples
///
/// ```
/// use weatherd::{parse_forecast_narrative, WeatherIcon};
///
/// let cond = parse_forecast_narrative(
///     "Mainly cloudy. Wind becoming west 20 km/h late this afternoon. High plus 4. UV index 1 or low.",
/// );
/// assert_eq!(cond.summary, "Mainly cloudy");
/// assert_eq!(cond.summary_icon, WeatherIcon::Cloudy);
/// assert_eq!(cond.temperature, 4.0);
/// assert_eq!(cond.wind_speed, 20);
/// assert_eq!(cond.uv_index, 1);
/// ```
pub fn parse_forecast_narrative(text: &str) -> WeatherCondition {
    let mut cond = WeatherCondition::default();

    for (idx, sentence) in text.split('.').enumerate() {
        let sentence = sentence.trim();

        if idx == 0 {
            cond.summary = sentence.to_string();
            cond.summary_icon = icon_from_text(sentence);
            continue;
        }

        if sentence.starts_with("Wind chill") {
            if let Some(value) = last_number(sentence) {
                cond.wind_chill = value;
            }
        } else if let Some(rest) = sentence.strip_prefix("Wind") {
            if let Some(speed) = speed_before_kmh(rest) {
                cond.wind_speed = speed;
            }
        } else if let Some(rest) = sentence.strip_prefix("UV index") {
            if let Some(uv) = rest.split_whitespace().next().and_then(|t| t.parse().ok()) {
                cond.uv_index = uv;
            }
        } else if sentence.starts_with("High")
            || sentence.starts_with("Low")
            || sentence.starts_with("Temperature")
        {
            if let Some(value) = last_number(sentence) {
                cond.temperature = value;
            }
        }
    }

    cond
}

fn speed_before_kmh(text: &str) -> Option<i32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens
        .windows(2)
        .filter(|pair| pair[1] == "km/h")
        .find_map(|pair| pair[0].parse().ok())
}
