//! Synchronous validation rules shared across request payloads.
//!
//! Rules return `validator::ValidationError` with a fixed message; the
//! orchestrator maps them onto field paths.

use validator::{ValidateEmail, ValidationError};

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates login format: lowercase latin letters and digits only.
pub fn validate_login(login: &str) -> Result<(), ValidationError> {
    if login.is_empty()
        || !login
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(rule_error(
            "login_invalid",
            "Login may contain only lowercase latin letters and digits",
        ));
    }
    Ok(())
}

/// Validates an email address format.
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(rule_error("email_invalid", "Invalid email address"));
    }
    Ok(())
}

/// Validates the fractional workload percentage. The message is fixed, not
/// derived from the violated bound.
pub fn validate_percentage(fraction: f64) -> Result<(), ValidationError> {
    if !crate::utils::percentage::is_valid_fraction(fraction) {
        return Err(rule_error(
            "percentage_invalid",
            "Percentage must be a multiple of 0.01 between 0.01 and 1.00",
        ));
    }
    Ok(())
}

/// Normalizes a phone number against the default region and returns the
/// canonical form used for storage. Normalization is idempotent: feeding a
/// normalized number back in yields the same value.
///
/// Accepted shapes (separators ` `, `-`, `(`, `)` are stripped):
/// - `+<country><subscriber>`: taken as already international;
/// - `8<10 digits>` under region "7": national trunk form, the `8` is
///   replaced with the country code;
/// - a bare 10-digit subscriber number: the region's country code is
///   prepended.
///
/// The result must be 10-15 digits and cannot start with `0` (no country
/// code does).
pub fn normalize_phone(raw: &str, country_code: &str) -> Result<String, ValidationError> {
    let invalid = || rule_error("phone_invalid", "Invalid phone number");

    let trimmed = raw.trim();
    let mut digits = String::new();
    let mut has_plus = false;
    for (i, ch) in trimmed.chars().enumerate() {
        match ch {
            '+' if i == 0 => has_plus = true,
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '(' | ')' => {}
            _ => return Err(invalid()),
        }
    }

    let normalized = if has_plus {
        digits
    } else if country_code == "7" && digits.len() == 11 && digits.starts_with('8') {
        // national trunk prefix of the default region
        format!("7{}", &digits[1..])
    } else if digits.len() == 10 {
        // A 10-digit number starting with the trunk prefix is a truncated
        // national form, not a subscriber number.
        if country_code == "7" && digits.starts_with('8') {
            return Err(invalid());
        }
        format!("{}{}", country_code, digits)
    } else {
        digits
    };

    if normalized.len() < 10 || normalized.len() > 15 || normalized.starts_with('0') {
        return Err(invalid());
    }

    Ok(format!("+{}", normalized))
}

/// Validates the comment accompanying a cancellation where the request
/// family demands one.
pub fn validate_cancel_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.trim().chars().count() < 5 {
        return Err(rule_error(
            "comment_too_short",
            "Comment must be at least 5 characters long",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejects_uppercase_and_symbols() {
        assert!(validate_login("").is_err());
        assert!(validate_login("Ivanov").is_err());
        assert!(validate_login("ivanov!").is_err());
        assert!(validate_login("иванов").is_err());
    }

    #[test]
    fn login_accepts_lowercase_alphanumeric() {
        assert!(validate_login("ivanovi").is_ok());
        assert!(validate_login("user42").is_ok());
    }

    #[test]
    fn email_format_is_checked() {
        assert!(validate_email_format("ivan@x.com").is_ok());
        assert!(validate_email_format("not-an-email").is_err());
    }

    #[test]
    fn percentage_rule_uses_fixed_message() {
        let err = validate_percentage(0.005).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Percentage must be a multiple of 0.01 between 0.01 and 1.00")
        );
        assert!(validate_percentage(0.25).is_ok());
        assert!(validate_percentage(1.0).is_ok());
    }

    #[test]
    fn phone_normalization_handles_national_format() {
        assert_eq!(
            normalize_phone("8 (926) 123-45-67", "7").unwrap(),
            "+79261234567"
        );
        assert_eq!(normalize_phone("9261234567", "7").unwrap(), "+79261234567");
    }

    #[test]
    fn phone_normalization_is_idempotent() {
        let once = normalize_phone("8 926 123 45 67", "7").unwrap();
        let twice = normalize_phone(&once, "7").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn phone_rejects_garbage() {
        assert!(normalize_phone("call me", "7").is_err());
        assert!(normalize_phone("123", "7").is_err());
        assert!(normalize_phone("12+34", "7").is_err());
    }

    #[test]
    fn phone_rejects_a_leading_zero_country_code() {
        assert!(normalize_phone("+0000000000", "7").is_err());
        assert!(normalize_phone("+05551234567", "7").is_err());
    }

    #[test]
    fn phone_rejects_a_truncated_trunk_form() {
        // 10 digits starting with the trunk prefix: a trunk number with a
        // digit missing, not a subscriber number.
        assert!(normalize_phone("8926123456", "7").is_err());
        // The full 11-digit trunk form still normalizes.
        assert_eq!(
            normalize_phone("89261234567", "7").unwrap(),
            "+79261234567"
        );
    }

    #[test]
    fn cancel_comment_minimum_length() {
        assert!(validate_cancel_comment("hi").is_err());
        assert!(validate_cancel_comment("  hi  ").is_err());
        assert!(validate_cancel_comment("valid comment").is_ok());
    }
}
