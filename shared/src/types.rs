//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
///
/// Exists only for the duration of a login attempt. `Debug` never prints
/// the password.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Enrollment (sign-up) request
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 7, max = 128))]
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Public view of a user: identification data only, never credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

/// The identity resolved from the caller's token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub username: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_uses_camel_case() {
        let json = r#"{"username":"alice","password":"abcdegh","confirmPassword":"abcdegh"}"#;
        let req: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.confirm_password, "abcdegh");
    }

    #[test]
    fn test_debug_hides_passwords() {
        let login = LoginRequest {
            username: "alice".to_string(),
            password: "abcdegh".to_string(),
        };
        let debug_str = format!("{:?}", login);
        assert!(debug_str.contains("alice"));
        assert!(!debug_str.contains("abcdegh"));

        let create = CreateUserRequest {
            username: "alice".to_string(),
            password: "abcdegh".to_string(),
            confirm_password: "abcdegh".to_string(),
        };
        assert!(!format!("{:?}", create).contains("abcdegh"));
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = UserResponse {
            id: 1,
            username: "alice".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json.get("password").is_none());
    }
}
