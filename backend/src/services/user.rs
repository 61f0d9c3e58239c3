//! User service for enrollment and identity lookup
//!
//! Responses carry identification data only; hashes stay in the store.

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{CredentialStore, StoredIdentity};
use shopgate_shared::{validation::validate_enrollment, CreateUserRequest, UserResponse};
use tracing::{info, warn};

/// User service
pub struct UserService;

impl UserService {
    /// Enroll a new user
    ///
    /// # Performance
    /// Password hashing is offloaded to blocking thread pool via `spawn_blocking`.
    pub async fn enroll(
        store: &dyn CredentialStore,
        req: CreateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        if let Err(e) = validate_enrollment(&req) {
            warn!(username = %req.username, error = %e, "Rejected enrollment");
            return Err(e.into());
        }

        let CreateUserRequest {
            username, password, ..
        } = req;

        // Cheap pre-check so a taken name does not cost a hash
        if store.find_by_username(&username).await?.is_some() {
            warn!(username = %username, "Username already enrolled");
            return Err(ApiError::BadRequest("Cannot create user".to_string()));
        }

        let password_hash = PasswordService::hash_async(password).await?;

        let user = store
            .create(&username, &password_hash)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Username already enrolled");
                ApiError::BadRequest("Cannot create user".to_string())
            })?;

        info!(user_id = user.id, username = %user.username, "User enrolled");

        Ok(to_response(user))
    }

    /// Look up a user by username
    pub async fn find_by_username(
        store: &dyn CredentialStore,
        username: &str,
    ) -> Result<UserResponse, ApiError> {
        store
            .find_by_username(username)
            .await?
            .map(to_response)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Look up a user by ID
    pub async fn find_by_id(store: &dyn CredentialStore, id: i64) -> Result<UserResponse, ApiError> {
        store
            .find_by_id(id)
            .await?
            .map(to_response)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}

fn to_response(identity: StoredIdentity) -> UserResponse {
    UserResponse {
        id: identity.id,
        username: identity.username,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryCredentialStore;

    fn request(username: &str, password: &str, confirm: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_enroll_stores_hash_not_password() {
        let store = InMemoryCredentialStore::new();

        let user = UserService::enroll(&store, request("alice", "abcdegh", "abcdegh"))
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "abcdegh");
        assert!(PasswordService::verify("abcdegh", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_enroll_rejects_invalid_password() {
        let store = InMemoryCredentialStore::new();

        let short = UserService::enroll(&store, request("alice", "12345", "12345")).await;
        assert!(matches!(short, Err(ApiError::Validation(_))));

        let mismatch = UserService::enroll(&store, request("alice", "abcdegh", "1234567")).await;
        assert!(matches!(mismatch, Err(ApiError::Validation(_))));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_enroll_rejects_existing_username() {
        let store = InMemoryCredentialStore::new();
        UserService::enroll(&store, request("alice", "abcdegh", "abcdegh"))
            .await
            .unwrap();

        let again = UserService::enroll(&store, request("alice", "1234567", "1234567")).await;
        assert!(matches!(again, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let store = InMemoryCredentialStore::new();

        assert!(matches!(
            UserService::find_by_username(&store, "nobody").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            UserService::find_by_id(&store, 42).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
