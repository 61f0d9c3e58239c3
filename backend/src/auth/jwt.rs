//! JWT token generation and validation
//!
//! Tokens are compact JWS strings signed with HMAC-SHA-512 under one
//! process-wide secret. Keys are derived once and shared behind `Arc`, so
//! verification on the request path is pure computation.

use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::error::TokenError;

const ALGORITHM: Algorithm = Algorithm::HS512;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Cloning is cheap: keys, validation rules and clock are all behind `Arc`.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtService {
    /// Create a JWT service reading wall-clock time
    pub fn new(secret: &SecretString, validity_secs: i64) -> Self {
        Self::with_clock(secret, validity_secs, Arc::new(SystemClock))
    }

    /// Create a JWT service with an explicit time source
    pub fn with_clock(secret: &SecretString, validity_secs: i64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against our clock after the signature, see `decode`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            validity: Duration::seconds(validity_secs),
            clock,
        }
    }

    /// Issue a token for `subject`, valid from now for the configured window
    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        let now = self.clock.now();
        let exp = now + self.validity;

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };
        let token = self.encode(&claims)?;

        Ok(IssuedToken { token, claims })
    }

    /// Sign arbitrary claims
    pub fn encode(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(ALGORITHM), claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token and return its claims
    ///
    /// The signature is checked before anything in the payload is trusted;
    /// only then is `exp` compared with the clock. A token is expired once
    /// `now >= exp`.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)?;
        let claims = token_data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Validity window applied at issuance
    #[inline]
    pub fn validity(&self) -> Duration {
        self.validity
    }
}
