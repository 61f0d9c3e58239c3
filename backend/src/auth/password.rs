//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.
//!
//! New hashes are Argon2id PHC strings. Stored bcrypt hashes (`$2a$`,
//! `$2b$`, `$2y$`) are still accepted by [`PasswordService::verify`] so
//! records enrolled by earlier deployments keep working.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. For high-throughput scenarios,
//! consider using `spawn_blocking` to avoid blocking the async runtime.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use tracing::warn;

/// Hash verified when a username is unknown, so a miss costs as much as a
/// wrong password.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("shopgate-timing-equalizer").ok());

/// Password hashing service
///
/// Uses Argon2id which is the recommended variant for password hashing.
/// It provides resistance against both side-channel and GPU-based attacks.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    ///
    /// # Performance Note
    /// This is CPU-intensive. For async contexts, wrap in `spawn_blocking`:
    /// ```ignore
    /// let hash = tokio::task::spawn_blocking(move || {
    ///     PasswordService::hash(&password)
    /// }).await??;
    /// ```
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Never fails: a hash that cannot be parsed is a non-match, so a
    /// corrupted record cannot take down the login path.
    pub fn verify(password: &str, hash: &str) -> bool {
        if is_bcrypt(hash) {
            return match bcrypt::verify(password, hash) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!(error = %e, "Unreadable bcrypt hash treated as mismatch");
                    false
                }
            };
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Unreadable password hash treated as mismatch");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Verify a password asynchronously (non-blocking)
    ///
    /// Only a failure of the blocking task itself is an error.
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }

    /// Burn the same work as a real verification, always failing
    pub async fn verify_dummy_async(password: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = Self::verify(&password, hash);
            }
            false
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

fn is_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$", "$2x$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
