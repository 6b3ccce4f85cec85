//! Numeric extraction helpers shared by the feed decoders.

/// Extracts the forecast-relevant number from a prose sentence.
///
/// Every whitespace-separated token that parses as a number replaces the running
/// value, so the *last* number wins ("Temperature falling to minus 8 in the afternoon"
/// yields `-8`). A token directly preceded by the word `minus` is negated.
///
/// Returns `None` only when no token in the sentence is numeric.
///
/// # Examples
///
/// ```
/// use weatherd::last_number;
///
/// assert_eq!(last_number("this is a text with minus 2 values"), Some(-2.0));
/// assert_eq!(last_number("this is a text with 2 values; and 1 other value"), Some(1.0));
/// assert_eq!(last_number("no numbers here"), None);
/// ```
pub fn last_number(sentence: &str) -> Option<f32> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();

    let mut last = None;
    for (idx, token) in tokens.iter().enumerate() {
        let Some(mut value) = parse_finite(token) else {
            continue;
        };
        if idx > 0 && tokens[idx - 1] == "minus" {
            value = -value;
        }
        last = Some(value);
    }
    last
}

/// Parses a float field, treating anything unparseable as zero.
pub(crate) fn float_or_zero(text: &str) -> f32 {
    parse_finite(text.trim()).unwrap_or(0.0)
}

/// Parses an integer field, treating anything unparseable as zero.
pub(crate) fn int_or_zero(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

/// Parses a float and truncates it towards zero, e.g. `16.1 km` visibility becomes `16`.
pub(crate) fn truncated_int_or_zero(text: &str) -> i32 {
    float_or_zero(text) as i32
}

// `f32::from_str` accepts "inf" and "NaN", which are words, not readings.
fn parse_finite(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(last_number("this is a text with 1 value"), Some(1.0));
    }

    #[test]
    fn test_multiple_values_last_wins() {
        assert_eq!(
            last_number("this is a text with 2 values; and 1 other value"),
            Some(1.0)
        );
        assert_eq!(
            last_number("Wind chill minus 7 in the morning and minus 14 in the afternoon"),
            Some(-14.0)
        );
    }

    #[test]
    fn test_negative_value() {
        assert_eq!(last_number("this is a text with minus 2 values"), Some(-2.0));
        assert_eq!(
            last_number("Temperature falling to minus 8 in the afternoon"),
            Some(-8.0)
        );
    }

    #[test]
    fn test_minus_only_applies_to_next_token() {
        assert_eq!(last_number("minus 3 then 5"), Some(5.0));
    }

    #[test]
    fn test_no_value() {
        assert_eq!(last_number("High near zero"), None);
        assert_eq!(last_number(""), None);
        assert_eq!(last_number("inf and NaN are not readings"), None);
    }

    #[test]
    fn test_field_helpers() {
        assert_eq!(float_or_zero(" -1.3 "), -1.3);
        assert_eq!(float_or_zero("n/a"), 0.0);
        assert_eq!(int_or_zero("86"), 86);
        assert_eq!(int_or_zero("86.5"), 0);
        assert_eq!(truncated_int_or_zero("16.1"), 16);
        assert_eq!(truncated_int_or_zero("garbage"), 0);
    }
}
