use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MAX_SPIN, MIN_SPIN};
use crate::error::TrackerError;
use crate::spin::Spin;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

fn is_digits(text: &str) -> bool {
    DIGITS.is_match(text)
}

/// Parses user-typed spin text. Only bare digits in range are accepted.
pub fn parse_spin(input: &str) -> Result<Spin, TrackerError> {
    let trimmed = input.trim();
    if !is_digits(trimmed) {
        return Err(TrackerError::InvalidSpinText(trimmed.to_string()));
    }
    // All digits, so the only failure left is overflow
    let number: i64 = trimmed
        .parse()
        .map_err(|_| TrackerError::InvalidSpinText(trimmed.to_string()))?;
    Spin::new(number)
}

/// Non-numeric limit text is ignored rather than rejected.
pub fn parse_limit(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Parses the comma-separated edit form. Tokens that are not plain digits
/// or fall outside the wheel are skipped.
pub fn parse_history_text(text: &str) -> Vec<i64> {
    text.split(',')
        .map(str::trim)
        .filter(|part| is_digits(part))
        .filter_map(|part| part.parse::<i64>().ok())
        .filter(|n| (MIN_SPIN as i64..=MAX_SPIN as i64).contains(n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spin() {
        assert_eq!(parse_spin(" 12 ").map(Spin::value), Ok(12));
        assert_eq!(parse_spin("37"), Err(TrackerError::InvalidSpin(37)));
        assert_eq!(
            parse_spin("-3"),
            Err(TrackerError::InvalidSpinText("-3".to_string()))
        );
        assert!(parse_spin("").is_err());
        assert!(parse_spin("99999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("50"), Some(50));
        assert_eq!(parse_limit("-2"), Some(-2));
        assert_eq!(parse_limit("abc"), None);
    }

    #[test]
    fn test_parse_history_text_skips_bad_tokens() {
        assert_eq!(parse_history_text("40, 5,7"), vec![5, 7]);
        assert_eq!(parse_history_text("1, x, , -4, 36"), vec![1, 36]);
        assert!(parse_history_text("").is_empty());
    }
}
