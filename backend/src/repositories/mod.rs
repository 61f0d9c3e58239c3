//! Database repositories
//!
//! Stored identities and the credential store adapters the login path
//! consumes.

pub mod credentials;
pub mod user;

pub use credentials::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
pub use user::{StoredIdentity, UserRepository};
