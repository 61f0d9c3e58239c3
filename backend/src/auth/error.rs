//! Authentication error types.
//!
//! [`TokenError`] is what the token codec reports; [`AuthError`] is the
//! taxonomy the login handler and the filter chain work with. Both are
//! terminal: nothing here is retried.

use thiserror::Error;

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a three-part compact token, or header/payload cannot be decoded.
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match header and payload under our key.
    #[error("Invalid token signature")]
    SignatureInvalid,

    /// Signature is valid but the expiration has passed.
    #[error("Token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            // A token signed with another algorithm was not signed by us.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Authentication and authorization failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid or expired token on a protected route.
    #[error("Authentication required")]
    Unauthenticated,

    /// Structurally invalid token.
    #[error("Malformed token")]
    Malformed,

    /// Request refused by the route policy.
    #[error("Access denied")]
    AccessDenied,

    /// The credential store or runtime failed; not a credential problem.
    #[error("Authentication system error: {0}")]
    AuthSystem(#[source] anyhow::Error),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::Malformed,
            TokenError::SignatureInvalid | TokenError::Expired => AuthError::Unauthenticated,
        }
    }
}
