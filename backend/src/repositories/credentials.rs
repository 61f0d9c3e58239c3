//! Credential store adapters
//!
//! The login handler only needs to turn a username into a stored identity.
//! [`CredentialStore`] is that seam; Postgres and in-memory backends sit
//! behind it.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::user::{StoredIdentity, UserRepository};
use crate::db;

/// Username → stored identity lookup, plus enrollment
///
/// Errors mean the store could not be reached or answered badly; "no such
/// user" is `Ok(None)`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredIdentity>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredIdentity>>;

    /// Store a new identity; `Ok(None)` if the username is taken
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<StoredIdentity>>;

    async fn health_check(&self) -> Result<()>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredIdentity>> {
        UserRepository::find_by_username(&self.pool, username).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredIdentity>> {
        UserRepository::find_by_id(&self.pool, id).await
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<StoredIdentity>> {
        UserRepository::create(&self.pool, username, password_hash).await
    }

    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }
}

#[derive(Default)]
struct MemoryUsers {
    by_username: HashMap<String, StoredIdentity>,
    next_id: i64,
}

/// Process-local store; contents are lost on restart
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<MemoryUsers>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.users.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredIdentity>> {
        Ok(self.users.read().await.by_username.get(username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredIdentity>> {
        let users = self.users.read().await;
        Ok(users.by_username.values().find(|user| user.id == id).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<StoredIdentity>> {
        let mut users = self.users.write().await;
        if users.by_username.contains_key(username) {
            return Ok(None);
        }

        users.next_id += 1;
        let identity = StoredIdentity {
            id: users.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users
            .by_username
            .insert(username.to_string(), identity.clone());

        Ok(Some(identity))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
