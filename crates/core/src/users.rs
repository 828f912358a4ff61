//! User field validation for registration and profile updates.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum email length in characters.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Default minimum password length.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Validate a username: required and at most [`MAX_USERNAME_LENGTH`] characters.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an email address: at most [`MAX_EMAIL_LENGTH`] characters and
/// matching a conservative pattern.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("email is required".into()));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(CoreError::Validation(format!(
            "email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Validate that a password is present and long enough.
pub fn validate_password(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::Validation("password is required".into()));
    }
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "password must be at least {min_length} characters"
        )));
    }
    Ok(())
}

/// Validate every field of a registration request, stopping at the first
/// failure.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), CoreError> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password, min_password_length)
}
