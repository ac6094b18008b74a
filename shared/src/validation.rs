//! Input validation functions
//!
//! Registration input is checked before the store is touched. Login input is
//! only checked for presence; anything else would let a caller distinguish
//! "malformed" from "unknown" accounts.

use validator::ValidateEmail;

/// Longest email accepted
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Longest display name accepted
pub const MAX_NAME_LENGTH: usize = 100;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Canonical form used as the uniqueness key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate email; the format check can be relaxed to presence only
pub fn validate_email(email: &str, require_format: bool) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err("Email too long".to_string());
    }
    if require_format && !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str, min_length: usize) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {} characters",
            min_length
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err("Password too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("test@example.com", true)]
    #[case("user.name@domain.co.uk", true)]
    #[case("", false)]
    #[case("invalid", false)]
    #[case("spaces in@email.com", false)]
    fn test_validate_email_strict(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email, true).is_ok(), ok);
    }

    #[test]
    fn test_validate_email_relaxed() {
        assert!(validate_email("invalid", false).is_ok());
        assert!(validate_email("", false).is_err());
        assert!(validate_email(&"a".repeat(256), false).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[rstest]
    #[case("pw123", 1, true)]
    #[case("", 1, false)]
    #[case("short", 8, false)]
    #[case("password123", 8, true)]
    fn test_validate_password(#[case] password: &str, #[case] min: usize, #[case] ok: bool) {
        assert_eq!(validate_password(password, min).is_ok(), ok);
    }

    #[test]
    fn test_password_byte_limit() {
        assert!(validate_password(&"a".repeat(72), 1).is_ok());
        assert!(validate_password(&"a".repeat(73), 1).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@X.com "), "alice@x.com");
    }

    proptest! {
        #[test]
        fn prop_normalize_email_is_idempotent(email in "[ A-Za-z0-9@._-]{0,40}") {
            let once = normalize_email(&email);
            prop_assert_eq!(normalize_email(&once), once);
        }
    }
}
