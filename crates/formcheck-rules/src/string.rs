//! String validation functions

use once_cell::sync::Lazy;
use regex::Regex;

static TEXT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZÑñáéíóúÁÉÍÓÚ]+(?: [a-zA-ZÑñáéíóúÁÉÍÓÚ]+)*$").expect("valid text regex")
});

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZÑñáéíóúÁÉÍÓÚ0-9]+(?: [a-zA-ZÑñáéíóúÁÉÍÓÚ0-9]+)*$")
        .expect("valid alphanumeric regex")
});

/// Words of Latin letters (accented vowels and Ñ included) separated by single spaces
pub fn is_text(value: &str) -> bool {
    TEXT_REGEX.is_match(value)
}

/// Like [`is_text`] but digits are allowed too
pub fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC_REGEX.is_match(value)
}

/// Length counts characters, not bytes
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn has_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text() {
        assert!(is_text("María José"));
        assert!(is_text("Ñandú"));
        assert!(!is_text("Maria  Jose"));
        assert!(!is_text("Maria1"));
        assert!(!is_text("Maria-Jose"));
        assert!(!is_text(" Maria"));
    }

    #[test]
    fn test_alphanumeric() {
        assert!(is_alphanumeric("Calle 45 Sur"));
        assert!(is_alphanumeric("abc123"));
        assert!(!is_alphanumeric("Calle #45"));
        assert!(!is_alphanumeric("two  spaces"));
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(has_min_length("ñandú", 5));
        assert!(!has_min_length("ñandú", 6));
        assert!(has_max_length("ñandú", 5));
        assert!(!has_max_length("ñandúes", 5));
    }
}
