//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys and the route policy are built once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling,
//!    so no session data can accumulate between requests

use crate::auth::{BearerScheme, Clock, JwtService, RoutePolicy, SystemClock};
use crate::config::AppConfig;
use crate::repositories::CredentialStore;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
///
/// Every dependency of the filter chain is passed in explicitly here.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Header name and prefix carrying tokens
    pub bearer: BearerScheme,
    /// Which routes are open, protected or denied
    pub policy: Arc<RoutePolicy>,
    /// Username → stored identity lookup
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Create application state with the standard route policy and wall-clock time
    pub fn new(credentials: Arc<dyn CredentialStore>, config: AppConfig) -> Result<Self> {
        Self::with_parts(
            credentials,
            config,
            RoutePolicy::standard(),
            Arc::new(SystemClock),
        )
    }

    /// Create application state from explicit parts
    ///
    /// # Note
    /// This pre-computes JWT keys from the config secret and should only
    /// be called once at application startup.
    pub fn with_parts(
        credentials: Arc<dyn CredentialStore>,
        config: AppConfig,
        policy: RoutePolicy,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let jwt = JwtService::with_clock(
            &config.auth.secret,
            config.auth.token_validity_secs,
            clock,
        );
        let bearer = BearerScheme::new(&config.auth.header_name, &config.auth.token_prefix)?;

        Ok(Self {
            config: Arc::new(config),
            jwt,
            bearer,
            policy: Arc::new(policy),
            credentials,
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn bearer(&self) -> &BearerScheme {
        &self.bearer
    }

    #[inline]
    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Get a reference to the credential store
    #[inline]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryCredentialStore;

    fn create_state(config: AppConfig) -> Result<AppState> {
        AppState::new(Arc::new(InMemoryCredentialStore::new()), config)
    }

    #[test]
    fn test_jwt_service_is_precomputed() {
        let state = create_state(AppConfig::default()).unwrap();
        let _cloned = state.clone();

        // JWT service should be ready to use
        let issued = state.jwt().issue("alice").unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(state.jwt().decode(&issued.token).unwrap().sub, "alice");
    }

    #[test]
    fn test_validity_window_comes_from_config() {
        let mut config = AppConfig::default();
        config.auth.token_validity_secs = 60;
        let state = create_state(config).unwrap();

        let claims = state.jwt().issue("alice").unwrap().claims;
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_invalid_header_name_fails_startup() {
        let mut config = AppConfig::default();
        config.auth.header_name = "bad header".to_string();

        assert!(create_state(config).is_err());
    }
}
