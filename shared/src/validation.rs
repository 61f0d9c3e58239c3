//! Input validation functions
//!
//! Enrollment rules for usernames and passwords. Length bounds are also
//! declared on [`CreateUserRequest`] through the `validator` derive.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::Validate;

use crate::errors::ValidationError;
use crate::types::CreateUserRequest;

/// Minimum password length accepted at enrollment
pub const MIN_PASSWORD_LEN: usize = 7;
/// Maximum password length accepted at enrollment
pub const MAX_PASSWORD_LEN: usize = 128;
/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 64;

/// Path segments under `/api/user` that route somewhere other than a
/// username lookup
pub const RESERVED_USERNAMES: [&str; 3] = ["create", "id", "me"];

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._@-]+$").expect("username pattern is valid"));

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(ValidationError::InvalidField {
            field: "username".to_string(),
        });
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(ValidationError::InvalidUsername);
    }
    if RESERVED_USERNAMES.contains(&username) {
        return Err(ValidationError::ReservedUsername(username.to_string()));
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(ValidationError::InvalidField {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// Validate a complete enrollment request
///
/// Checks declared length bounds first, then the username character set,
/// then that the confirmation matches.
pub fn validate_enrollment(req: &CreateUserRequest) -> Result<(), ValidationError> {
    req.validate()?;
    validate_username(&req.username)?;
    validate_password(&req.password)?;
    if req.password != req.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
