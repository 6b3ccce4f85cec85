use crate::text::icon::icon_from_text;
use crate::text::numeric::{float_or_zero, int_or_zero, truncated_int_or_zero};
use crate::types::weather_condition::WeatherCondition;

const LINE_BREAK: &str = "<br/>";
const CELSIUS_SUFFIXES: [&str; 2] = ["°C", "&deg;C"];

/// Decodes a "current conditions" block into a [`WeatherCondition`].
///
/// The block is a list of `Label: value` pairs separated by `<br/>`, with labels
/// usually wrapped in `<b>` tags:
///
/// ```text
/// <b>Condition:</b> Cloudy <br/>
/// <b>Temperature:</b> -1.3°C <br/>
/// <b>Wind:</b> SW 21 km/h<br/>
/// ```
///
/// Lines that don't contain exactly one `:` are skipped (this drops e.g.
/// "Observed at: ... 8:00 PM"), as are unknown labels. A value that fails to parse
/// leaves its field at zero; the remaining lines are still decoded.
///
/// # Examples
///
/// ```
/// use weatherd::{parse_current_conditions, WeatherIcon};
///
/// let cond = parse_current_conditions(
///     "Condition: Cloudy <br/> Temperature: -1.3°C <br/> Wind: SW 21 km/h",
/// );
/// assert_eq!(cond.summary, "Cloudy");
/// assert_eq!(cond.summary_icon, WeatherIcon::Cloudy);
/// assert_eq!(cond.temperature, -1.3);
/// assert_eq!(cond.wind_speed, 21);
/// ```
pub fn parse_current_conditions(text: &str) -> WeatherCondition {
    let mut cond = WeatherCondition::default();

    for line in text.split(LINE_BREAK) {
        let line = line.trim().replace("<b>", "").replace("</b>", "");

        let parts: Vec<&str> = line.split(':').collect();
        let [label, value] = parts.as_slice() else {
            continue;
        };
        let value = value.trim();

        match *label {
            "Condition" => {
                cond.summary = value.to_string();
                cond.summary_icon = icon_from_text(value);
            }
            "Temperature" => cond.temperature = float_or_zero(&strip_celsius(value)),
            "Wind Chill" => cond.wind_chill = float_or_zero(&strip_celsius(value)),
            "Dewpoint" => cond.dew_point = float_or_zero(&strip_celsius(value)),
            "Pressure" => cond.pressure = float_or_zero(&value.replace(" kPa", "")),
            "Visibility" => cond.visibility = truncated_int_or_zero(&value.replace(" km", "")),
            "Humidity" => cond.humidity = int_or_zero(&value.replace(" %", "")),
            "Wind" => cond.wind_speed = wind_speed(value),
            _ => {}
        }
    }

    cond
}

fn strip_celsius(value: &str) -> String {
    CELSIUS_SUFFIXES
        .iter()
        .fold(value.to_string(), |acc, suffix| acc.replace(suffix, ""))
}

/// `"21 km/h"` or `"SW 21 km/h"`; the direction is not modelled.
fn wind_speed(value: &str) -> i32 {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    match tokens.as_slice() {
        [speed, _unit] => int_or_zero(speed),
        [_direction, speed, _unit] => int_or_zero(speed),
        _ => 0,
    }
}
