//! Resolves weekday names used in forecast titles ("Monday", "Tuesday night")
//! into absolute timestamps relative to the feed's publication time.

use crate::text::error::DateError;
use chrono::{DateTime, Datelike, Days, TimeZone, Timelike};

const DAYS_OF_WEEK: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// `DAY_DELTAS[start][target]` is the number of days to move forward from `start`
/// to reach `target`. Same day is zero, never seven.
const DAY_DELTAS: [[u64; 7]; 7] = [
    [0, 1, 2, 3, 4, 5, 6],
    [6, 0, 1, 2, 3, 4, 5],
    [5, 6, 0, 1, 2, 3, 4],
    [4, 5, 6, 0, 1, 2, 3],
    [3, 4, 5, 6, 0, 1, 2],
    [2, 3, 4, 5, 6, 0, 1],
    [1, 2, 3, 4, 5, 6, 0],
];

/// Hour of day pinned for a daytime forecast slot.
pub const DAY_SLOT_HOUR: u32 = 12;
/// Hour of day pinned for a night forecast slot.
pub const NIGHT_SLOT_HOUR: u32 = 23;

fn day_index(name: &str) -> Option<usize> {
    let name = name.to_lowercase();
    DAYS_OF_WEEK.iter().position(|day| *day == name)
}

/// Moves `anchor` forward to the next occurrence of `day_name` (case-insensitive).
///
/// If the anchor already falls on `day_name` the anchor itself is returned, so
/// "today" never resolves to next week. The time of day is left unchanged.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] when `day_name` isn't an English weekday name.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use weatherd::resolve_relative_day;
///
/// let saturday = Utc.with_ymd_and_hms(2019, 1, 5, 10, 0, 0).unwrap();
/// let monday = resolve_relative_day(&saturday, "Monday").unwrap();
/// assert_eq!(monday, Utc.with_ymd_and_hms(2019, 1, 7, 10, 0, 0).unwrap());
/// assert!(resolve_relative_day(&saturday, "Taco").is_err());
/// ```
pub fn resolve_relative_day<Tz: TimeZone>(
    anchor: &DateTime<Tz>,
    day_name: &str,
) -> Result<DateTime<Tz>, DateError> {
    let start = anchor.weekday().num_days_from_sunday() as usize;
    let Some(target) = day_index(day_name) else {
        return Err(DateError::InvalidDate(day_name.to_string()));
    };

    let days = DAY_DELTAS[start][target];
    anchor
        .clone()
        .checked_add_days(Days::new(days))
        .ok_or(DateError::OutOfRange { days })
}

/// Resolves a forecast title such as `"Monday night: Clear. Low minus 9."` to the
/// moment that slot describes.
///
/// The first word before the `:` is the day name. If the second word is `night` the
/// slot is pinned to 23:00, otherwise to 12:00.
pub fn forecast_time_for_title<Tz: TimeZone>(
    anchor: &DateTime<Tz>,
    title: &str,
) -> Result<DateTime<Tz>, DateError> {
    let slot = title.split(':').next().unwrap_or_default();
    let mut words = slot.split_whitespace();
    let day_name = words.next().unwrap_or_default();
    let hour = match words.next() {
        Some("night") => NIGHT_SLOT_HOUR,
        _ => DAY_SLOT_HOUR,
    };

    let date = resolve_relative_day(anchor, day_name)?;
    date.with_hour(hour)
        .and_then(|d| d.with_minute(0))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .ok_or_else(|| DateError::InvalidDate(title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn saturday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_basic_case() {
        let res = resolve_relative_day(&saturday(), "Monday").unwrap();
        assert_eq!(res, Utc.with_ymd_and_hms(2019, 1, 7, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_future_date() {
        let res = resolve_relative_day(&saturday(), "Taco");
        assert_eq!(res, Err(DateError::InvalidDate("Taco".to_string())));
    }

    #[test]
    fn test_same_day_is_today() {
        let res = resolve_relative_day(&saturday(), "saturday").unwrap();
        assert_eq!(res, saturday());
    }

    #[test]
    fn test_case_insensitive_and_wraps_week() {
        let res = resolve_relative_day(&saturday(), "FRIDAY").unwrap();
        assert_eq!(res, Utc.with_ymd_and_hms(2019, 1, 11, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_delta_table_matches_weekday_arithmetic() {
        for start in 0..7 {
            for target in 0..7 {
                assert_eq!(DAY_DELTAS[start][target] as usize, (target + 7 - start) % 7);
            }
        }
    }

    #[test]
    fn test_every_weekday_moves_forward_at_most_six_days() {
        // 2019-01-06 is a Sunday.
        for offset in 0..7 {
            let anchor = Utc.with_ymd_and_hms(2019, 1, 6 + offset, 8, 0, 0).unwrap();
            for day in DAYS_OF_WEEK {
                let res = resolve_relative_day(&anchor, day).unwrap();
                let delta = (res - anchor).num_days();
                assert!((0..7).contains(&delta));
                assert_eq!(res.format("%A").to_string().to_lowercase(), day);
            }
        }
    }

    #[test]
    fn test_forecast_time_day_and_night() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let anchor = est.with_ymd_and_hms(2019, 1, 5, 11, 0, 0).unwrap();

        let day = forecast_time_for_title(&anchor, "Monday: Sunny. High plus 4.").unwrap();
        assert_eq!(day, est.with_ymd_and_hms(2019, 1, 7, 12, 0, 0).unwrap());

        let night = forecast_time_for_title(&anchor, "Monday night: Clear. Low minus 9.").unwrap();
        assert_eq!(night, est.with_ymd_and_hms(2019, 1, 7, 23, 0, 0).unwrap());

        let tonight = forecast_time_for_title(&anchor, "Saturday night: Cloudy.").unwrap();
        assert_eq!(tonight, est.with_ymd_and_hms(2019, 1, 5, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_forecast_time_unknown_title() {
        let res = forecast_time_for_title(&saturday(), "Current Conditions: -1.3°C");
        assert_eq!(res, Err(DateError::InvalidDate("Current".to_string())));
        assert!(forecast_time_for_title(&saturday(), "").is_err());
    }
}
