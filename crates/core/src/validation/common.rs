//! Predicates and patterns shared by several schemas.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::limits;
use crate::types::Email;

use super::TextRule;

/// Earliest accepted birth date (inclusive).
pub const BIRTH_DATE_MIN: NaiveDate = match NaiveDate::from_ymd_opt(1955, 1, 1) {
    Some(date) => date,
    None => panic!("invalid minimum birth date"),
};

/// Latest accepted birth date (inclusive).
pub const BIRTH_DATE_MAX: NaiveDate = match NaiveDate::from_ymd_opt(2007, 12, 31) {
    Some(date) => date,
    None => panic!("invalid maximum birth date"),
};

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_]*$").expect("Invalid regex"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));

static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Username rule: 5-20 chars, letters/digits/underscore, no leading
/// underscore, no whitespace.
#[must_use]
pub fn username_rule(pattern_message: &'static str) -> TextRule {
    TextRule::new()
        .min_chars(5, "Mínimo 5 caracteres")
        .max_chars_default(limits::user::USERNAME)
        .pattern(&USERNAME, pattern_message)
}

/// Password strength rule: 8-50 chars with a lowercase letter, an uppercase
/// letter, a digit and a symbol.
#[must_use]
pub fn strong_password_rule(strength_message: &'static str) -> TextRule {
    TextRule::new()
        .min_chars(8, "Mínimo 8 caracteres")
        .max_chars_default(limits::user::PASSWORD)
        .refine(is_strong_password, strength_message)
}

/// Whether `password` mixes lowercase, uppercase, digit and symbol.
///
/// A symbol is anything that is neither a word character (ASCII letter,
/// digit, underscore) nor whitespace.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != '_' && !c.is_whitespace());
    lower && upper && digit && symbol
}

/// Email rule with the registry's max length.
#[must_use]
pub fn email_rule() -> TextRule {
    TextRule::new()
        .refine(Email::is_valid, "Email válido")
        .max_chars_default(limits::user::EMAIL)
}

/// Looser credential check used by the login form: an email-shaped string or
/// any value with at least three non-blank characters.
#[must_use]
pub fn is_email_or_username(value: &str) -> bool {
    LOOSE_EMAIL.is_match(value) || value.trim().chars().count() >= 3
}

/// Why a birth date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDateError {
    Missing,
    Malformed,
    OutOfRange,
}

/// Parse a `YYYY-MM-DD` birth date and check it lies within
/// [`BIRTH_DATE_MIN`]..=[`BIRTH_DATE_MAX`].
///
/// # Errors
///
/// Returns which of the three checks failed first.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, BirthDateError> {
    if value.is_empty() {
        return Err(BirthDateError::Missing);
    }
    let trimmed = value.trim();
    if !ISO_DATE.is_match(trimmed) {
        return Err(BirthDateError::Malformed);
    }
    let date =
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| BirthDateError::Malformed)?;
    if !(BIRTH_DATE_MIN..=BIRTH_DATE_MAX).contains(&date) {
        return Err(BirthDateError::OutOfRange);
    }
    Ok(date)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rule() {
        let rule = username_rule("formato");
        assert!(rule.check("rider_01").is_ok());
        assert_eq!(rule.check("abc").unwrap_err(), "Mínimo 5 caracteres");
        assert_eq!(rule.check("_rider").unwrap_err(), "formato");
        assert_eq!(rule.check("rider 01").unwrap_err(), "formato");
        assert_eq!(rule.check("jinete_ñ").unwrap_err(), "formato");
        assert_eq!(
            rule.check(&"a".repeat(21)).unwrap_err(),
            "Máximo 20 caracteres"
        );
    }

    #[test]
    fn test_strong_password() {
        assert!(is_strong_password("Moto#2024"));
        assert!(!is_strong_password("moto#2024"));
        assert!(!is_strong_password("MOTO#2024"));
        assert!(!is_strong_password("Moto_2024"));
        assert!(!is_strong_password("Moto 2024"));
        assert!(!is_strong_password("Moto#moto"));
    }

    #[test]
    fn test_email_or_username() {
        assert!(is_email_or_username("a@b.co"));
        assert!(is_email_or_username("bob"));
        assert!(!is_email_or_username(" b "));
    }

    #[test]
    fn test_birth_date_boundaries() {
        assert_eq!(parse_birth_date("1955-01-01").unwrap(), BIRTH_DATE_MIN);
        assert_eq!(parse_birth_date("2007-12-31").unwrap(), BIRTH_DATE_MAX);
        assert_eq!(parse_birth_date("1954-12-31"), Err(BirthDateError::OutOfRange));
        assert_eq!(parse_birth_date("2008-01-01"), Err(BirthDateError::OutOfRange));
    }

    #[test]
    fn test_birth_date_format() {
        assert_eq!(parse_birth_date(""), Err(BirthDateError::Missing));
        assert_eq!(parse_birth_date("01/02/1990"), Err(BirthDateError::Malformed));
        assert_eq!(parse_birth_date("1990-02-30"), Err(BirthDateError::Malformed));
        assert!(parse_birth_date(" 1990-02-28 ").is_ok());
    }
}
