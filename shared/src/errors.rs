//! Error types shared across Shopgate crates

use thiserror::Error;

/// Enrollment input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid value for field '{field}'")]
    InvalidField { field: String },

    #[error("Username contains invalid characters")]
    InvalidUsername,

    #[error("Username '{0}' is reserved")]
    ReservedUsername(String),

    #[error("Password and confirmation do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Name of the offending request field, if any
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidField { field } => field,
            ValidationError::InvalidUsername | ValidationError::ReservedUsername(_) => "username",
            ValidationError::PasswordMismatch => "confirmPassword",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report a single field; the caller only needs to know what to fix first.
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        ValidationError::InvalidField {
            field: fields.into_iter().next().unwrap_or_default(),
        }
    }
}
