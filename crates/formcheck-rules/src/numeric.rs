//! Numeric validation and money formatting

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digit regex"));

// The decimal branch requires a space after the first fractional digit, so it
// never matches trimmed input. Kept as observed behavior.
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-?[0-9]+|-?[0-9]{1,3}(?:,[0-9]{3})+)?(?:\.[0-9] +)?$")
        .expect("valid number regex")
});

// Accepts `digits` or `digits,digits`; no fraction is actually required.
static DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]*,)?[0-9]+$").expect("valid decimal regex"));

/// Only ASCII digits
pub fn is_digits(value: &str) -> bool {
    DIGIT_REGEX.is_match(value)
}

/// Integer, optionally grouped with `,` thousands separators
pub fn is_number(value: &str) -> bool {
    NUMBER_REGEX.is_match(value)
}

pub fn is_decimal(value: &str) -> bool {
    DECIMAL_REGEX.is_match(value)
}

/// Parse the longest numeric prefix of `value`, the way lenient float parsing does
///
/// Leading whitespace and trailing garbage are ignored: `"12abc"` is `12`.
/// Returns `None` when no digits start the value.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].trim_end_matches('.').parse().ok()
}

/// Strictly greater than `min`; values without a numeric prefix are not judged
pub fn exceeds_min(value: &str, min: f64) -> bool {
    parse_leading_number(value).map_or(true, |v| v > min)
}

/// Strictly less than `max`; values without a numeric prefix are not judged
pub fn below_max(value: &str, max: f64) -> bool {
    parse_leading_number(value).map_or(true, |v| v < max)
}

/// Separators used when reformatting money input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyFormat {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

/// Result of reformatting a money value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reformatted {
    /// Text written back into the field
    pub display: String,
    /// Plain numeric text: no grouping, `.` as decimal point
    pub value: String,
}

impl Reformatted {
    pub fn numeric(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

/// Reformat money input as the user types
///
/// Leading zeros are dropped, the integer part is grouped, and only two
/// digits are kept after the first decimal separator.
pub fn format_money(raw: &str, format: MoneyFormat) -> Reformatted {
    let trimmed = raw.trim().trim_start_matches(format.decimal_separator);

    let (int_raw, frac_raw) = match trimmed.split_once(format.decimal_separator) {
        Some((int_raw, frac_raw)) => (int_raw, Some(frac_raw)),
        None => (trimmed, None),
    };

    let all_digits: String = int_raw.chars().filter(char::is_ascii_digit).collect();
    let mut int_digits = all_digits.trim_start_matches('0').to_string();
    if int_digits.is_empty() && (frac_raw.is_some() || !all_digits.is_empty()) {
        int_digits.push('0');
    }

    let grouped = group_thousands(&int_digits, format.thousands_separator);

    match frac_raw {
        Some(frac_raw) => {
            let frac: String = frac_raw.chars().filter(char::is_ascii_digit).take(2).collect();
            let value = if frac.is_empty() {
                int_digits.clone()
            } else {
                format!("{}.{}", int_digits, frac)
            };
            Reformatted {
                display: format!("{}{}{}", grouped, format.decimal_separator, frac),
                value,
            }
        }
        None => Reformatted {
            display: grouped,
            value: int_digits,
        },
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    digits
        .chars()
        .enumerate()
        .fold(String::with_capacity(len + len / 3), |mut acc, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                acc.push(separator);
            }
            acc.push(c);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("123", true)]
    #[case("0012", true)]
    #[case("12a", false)]
    #[case("-12", false)]
    #[case("١٢", false)]
    fn test_digits(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_digits(value), expected);
    }

    #[rstest]
    #[case("42", true)]
    #[case("-42", true)]
    #[case("1,234,567", true)]
    #[case("-1,234", true)]
    #[case("1,23", false)]
    #[case("1.5", false)]
    #[case("abc", false)]
    fn test_number(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_number(value), expected);
    }

    #[rstest]
    #[case("15", true)]
    #[case("15,75", true)]
    #[case(",75", true)]
    #[case("1,2,3", false)]
    #[case("15.75", false)]
    #[case("15,", false)]
    fn test_decimal(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_decimal(value), expected);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("10"), Some(10.0));
        assert_eq!(parse_leading_number("  -3.5kg"), Some(-3.5));
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn test_bounds_are_strict() {
        assert!(!exceeds_min("10", 10.0));
        assert!(exceeds_min("11", 10.0));
        assert!(!below_max("100", 100.0));
        assert!(below_max("99.9", 100.0));
        assert!(exceeds_min("n/a", 10.0));
    }

    #[test]
    fn test_format_money_groups_thousands() {
        let out = format_money("1000000", MoneyFormat::default());
        assert_eq!(out.display, "1.000.000");
        assert_eq!(out.value, "1000000");
        assert_eq!(out.numeric(), Some(1_000_000.0));
    }

    #[test]
    fn test_format_money_regroups_typed_digits() {
        let out = format_money("1.000.0", MoneyFormat::default());
        assert_eq!(out.display, "10.000");
        assert_eq!(out.value, "10000");
    }

    #[test]
    fn test_format_money_fraction() {
        let out = format_money("001234,5678", MoneyFormat::default());
        assert_eq!(out.display, "1.234,56");
        assert_eq!(out.value, "1234.56");

        let out = format_money("0,5", MoneyFormat::default());
        assert_eq!(out.display, "0,5");
        assert_eq!(out.value, "0.5");

        let out = format_money("12,", MoneyFormat::default());
        assert_eq!(out.display, "12,");
        assert_eq!(out.value, "12");
    }

    #[test]
    fn test_format_money_edge_cases() {
        assert_eq!(format_money("000", MoneyFormat::default()).display, "0");
        assert_eq!(format_money(",,5", MoneyFormat::default()).display, "5");
        assert_eq!(format_money("abc", MoneyFormat::default()).display, "");
        assert_eq!(format_money("$ 1500", MoneyFormat::default()).display, "1.500");
    }

    #[test]
    fn test_format_money_swapped_separators() {
        let format = MoneyFormat {
            thousands_separator: ',',
            decimal_separator: '.',
        };
        let out = format_money("1234567.891", format);
        assert_eq!(out.display, "1,234,567.89");
        assert_eq!(out.value, "1234567.89");
    }
}
