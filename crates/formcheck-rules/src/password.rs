//! Password validation functions

/// Default minimum length for the `password` rule
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Lenient minimum length some deployments use
pub const LENIENT_MIN_LENGTH: usize = 6;

/// Validates password strength
///
/// The trimmed value must have at least `min_length` characters, an ASCII
/// uppercase letter, an ASCII digit, a non-word character, and no whitespace.
///
/// # Examples
/// ```
/// use formcheck_rules::password::is_strong_password;
/// assert!(is_strong_password("Secure@Pass1", 8));
/// assert!(!is_strong_password("NoSpecial123", 8));
/// ```
pub fn is_strong_password(password: &str, min_length: usize) -> bool {
    let password = password.trim();

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(is_non_word);
    let has_whitespace = password.chars().any(char::is_whitespace);

    password.chars().count() >= min_length
        && has_uppercase
        && has_digit
        && has_special
        && !has_whitespace
}

/// Anything outside `[A-Za-z0-9_]`, accented letters included
fn is_non_word(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}
