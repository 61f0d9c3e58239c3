//! Database connection and credential store selection
//!
//! PostgreSQL is only touched when `store.backend = "postgres"`; the
//! in-memory backend needs no connection at all.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{StoreBackend, StoreConfig};
use crate::repositories::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};

const MIN_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Create a PostgreSQL connection pool for the credential store
///
/// Lookups happen on the login path, so acquiring a connection fails fast
/// rather than holding the request.
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid store.url")?
        .application_name("shopgate");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to credential database")?;

    info!(max = config.max_connections, "Database pool created");

    Ok(pool)
}

/// Run database migrations (creates the `users` table)
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

/// Build the configured credential store
pub async fn open_credential_store(
    config: &StoreConfig,
    migrate: bool,
) -> Result<Arc<dyn CredentialStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory credential store; enrolled users are lost on restart");
            Ok(Arc::new(InMemoryCredentialStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = create_pool(config).await?;
            if migrate {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgCredentialStore::new(pool)))
        }
    }
}
