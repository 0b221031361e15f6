//! Field validation for the login form.
//!
//! Pure, total checks: an input that does not match any accepted format is
//! a `false` return, never an error.

use regex::Regex;
use std::sync::OnceLock;

/// Specify the minimum accepted password length in characters.
///
const MIN_PASSWORD_LENGTH: usize = 6;

/// Return the compiled email shape pattern. No exhaustive RFC compliance,
/// just `local@domain.tld` with no whitespace or extra `@`.
///
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Return the compiled pattern for a punctuated national ID.
///
fn formatted_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$")
            .expect("national ID pattern is a valid regex")
    })
}

/// Returns true if the value is accepted as a login identifier: an
/// email-shaped string, exactly 11 digits, or a punctuated national ID
/// (`ddd.ddd.ddd-dd`).
///
pub fn is_valid_identifier(value: &str) -> bool {
    let is_raw_id = value.len() == 11 && value.bytes().all(|b| b.is_ascii_digit());
    email_pattern().is_match(value) || is_raw_id || formatted_id_pattern().is_match(value)
}

/// Returns true if the password meets the minimum length. No charset
/// requirements are enforced on this side.
///
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_accepts_email_shapes() {
        assert!(is_valid_identifier("user@example.com"));
        assert!(is_valid_identifier("first.last@sub.domain.gov.br"));
        assert!(is_valid_identifier("a@b.c"));
    }

    #[test]
    fn test_identifier_rejects_broken_emails() {
        assert!(!is_valid_identifier("user@example"));
        assert!(!is_valid_identifier("user example@mail.com"));
        assert!(!is_valid_identifier("user@@example.com"));
        assert!(!is_valid_identifier("@example.com"));
        assert!(!is_valid_identifier("user@"));
    }

    #[test]
    fn test_identifier_accepts_raw_national_id() {
        assert!(is_valid_identifier("12345678901"));
        assert!(is_valid_identifier("00000000000"));
    }

    #[test]
    fn test_identifier_accepts_formatted_national_id() {
        assert!(is_valid_identifier("123.456.789-01"));
        assert!(is_valid_identifier("000.000.000-00"));
    }

    #[test]
    fn test_identifier_rejects_wrong_digit_counts() {
        assert!(!is_valid_identifier("1234567890"));
        assert!(!is_valid_identifier("123456789012"));
        assert!(!is_valid_identifier("123.456.789-0"));
        assert!(!is_valid_identifier("123.456.78-901"));
    }

    #[test]
    fn test_identifier_rejects_non_numeric_non_email() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("not-an-identifier"));
        assert!(!is_valid_identifier("1234567890a"));
        assert!(!is_valid_identifier("123 456 789 01"));
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(!is_valid_password(""));
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("123456"));
        assert!(is_valid_password("secret1"));
    }

    #[test]
    fn test_password_counts_characters_not_bytes() {
        // Six multibyte characters meet the minimum.
        assert!(is_valid_password("senha\u{e7}"));
    }
}
