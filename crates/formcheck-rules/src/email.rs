//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Dot-separated labels on both sides of `@`, and a 2-3 letter TLD.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[_a-z0-9-]+(?:\.[_a-z0-9-]+)*@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,3}$")
        .expect("valid email regex")
});

/// Validates email format
///
/// The value is trimmed and lower-cased before matching, so case never
/// makes an address invalid.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a.b-c@sub.domain.co"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("User_Name@Example.ORG"));
        assert!(is_valid_email("  user@example.com "));
        assert!(is_valid_email("first.last@mail.example.net"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user+tag@example.com"));
        assert!(!is_valid_email("user@example.info"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email(".user@example.com"));
    }
}
