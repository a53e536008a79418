//! Account field validation and role constants.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Username format: 3 to 32 word characters.
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]{3,32}$").unwrap_or_else(|e| panic!("invalid username regex: {e}"))
});

/// Accounts with this role manage notices, FAQs, and content reports.
/// Regular accounts carry the database default role.
pub const ROLE_ADMIN: &str = "admin";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const DISPLAY_NAME_MAX: usize = 50;

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Username must be 3-32 characters of letters, digits, or underscores".into(),
        ))
    }
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len == 0 || len > DISPLAY_NAME_MAX {
        return Err(CoreError::Validation(format!(
            "Display name must be between 1 and {DISPLAY_NAME_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_format() {
        assert!(validate_username("mina_kim").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("spaced name").is_err());
        assert!(validate_username("tilde~user").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn display_name_bounds() {
        assert!(validate_display_name("  ").is_err());
        assert!(validate_display_name("Mina").is_ok());
        assert!(validate_display_name(&"n".repeat(51)).is_err());
    }
}
