//! Login: verify a credential pair, issue a token
//!
//! One attempt per call, no internal retries:
//! lookup → verify → issue. Unknown users and wrong passwords fail the same
//! way; a store outage is reported as a system error, never as bad
//! credentials.
//!
//! # Performance
//! Password verification is offloaded to the blocking thread pool.

use crate::auth::{AuthError, IssuedToken, JwtService, PasswordService};
use crate::repositories::CredentialStore;
use tracing::{error, info, warn};

/// Login service
pub struct LoginService;

impl LoginService {
    /// Authenticate `username`/`password` and issue a signed token
    pub async fn login(
        store: &dyn CredentialStore,
        jwt_service: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let identity = store.find_by_username(username).await.map_err(|e| {
            error!(username, error = ?e, "Credential lookup failed");
            AuthError::AuthSystem(e)
        })?;

        // Verify on the blocking pool (CPU-intensive). Unknown users still
        // pay for one verification.
        let password_owned = password.to_string();
        let verified = match &identity {
            Some(identity) => {
                PasswordService::verify_async(password_owned, identity.password_hash.clone()).await
            }
            None => PasswordService::verify_dummy_async(password_owned).await,
        }
        .map_err(AuthError::AuthSystem)?;

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => {
                warn!(username, "Authentication failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = jwt_service
            .issue(&identity.username)
            .map_err(AuthError::AuthSystem)?;

        info!(username = %identity.username, expires_at = issued.claims.exp, "Authentication succeeded");

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Clock, ManualClock};
    use crate::repositories::{InMemoryCredentialStore, StoredIdentity};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::Arc;

    const VALIDITY_SECS: i64 = 864_000;

    /// Store whose backend is unreachable
    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn find_by_username(&self, _username: &str) -> anyhow::Result<Option<StoredIdentity>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn find_by_id(&self, _id: i64) -> anyhow::Result<Option<StoredIdentity>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn create(
            &self,
            _username: &str,
            _password_hash: &str,
        ) -> anyhow::Result<Option<StoredIdentity>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn health_check(&self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn jwt_service() -> (JwtService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let jwt = JwtService::with_clock(
            &SecretString::new("test-secret".to_string()),
            VALIDITY_SECS,
            clock.clone(),
        );
        (jwt, clock)
    }

    async fn store_with_alice() -> InMemoryCredentialStore {
        let store = InMemoryCredentialStore::new();
        let hash = PasswordService::hash("abcdegh").unwrap();
        store.create("alice", &hash).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_login_issues_token_for_subject() {
        let store = store_with_alice().await;
        let (jwt, clock) = jwt_service();
        let issued_at = clock.now().timestamp();

        let issued = LoginService::login(&store, &jwt, "alice", "abcdegh")
            .await
            .unwrap();

        let claims = jwt.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, issued_at + VALIDITY_SECS);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_identically() {
        let store = store_with_alice().await;
        let (jwt, _clock) = jwt_service();

        let wrong_password = LoginService::login(&store, &jwt, "alice", "wrong1").await;
        let unknown_user = LoginService::login(&store, &jwt, "nonExistingUsername", "abcdegh").await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_corrupted_hash_is_invalid_credentials() {
        let store = InMemoryCredentialStore::new();
        store.create("alice", "corrupted$hash").await.unwrap();
        let (jwt, _clock) = jwt_service();

        let result = LoginService::login(&store, &jwt, "alice", "abcdegh").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_store_failure_is_system_error() {
        let (jwt, _clock) = jwt_service();

        let result = LoginService::login(&BrokenStore, &jwt, "alice", "abcdegh").await;
        assert!(matches!(result, Err(AuthError::AuthSystem(_))));
    }
}
