//! Session-store migrations.
//!
//! Each service keeps its sessions in its own database; the only schema
//! either needs is the tower-sessions table, created by the store itself.

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the storefront session schema.
///
/// # Errors
///
/// Returns an error if `STOREFRONT_DATABASE_URL` is unset or the
/// migration fails.
pub async fn storefront() -> Result<(), MigrateError> {
    migrate("STOREFRONT_DATABASE_URL").await
}

/// Create the admin session schema.
///
/// # Errors
///
/// Returns an error if `ADMIN_DATABASE_URL` is unset or the migration
/// fails.
pub async fn admin() -> Result<(), MigrateError> {
    migrate("ADMIN_DATABASE_URL").await
}

async fn migrate(env_key: &str) -> Result<(), MigrateError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url(env_key)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url.expose_secret())
        .await?;

    let store = PostgresStore::new(pool);
    store.migrate().await?;

    tracing::info!(target_env = env_key, "session schema migrated");
    Ok(())
}

/// Read a database URL, falling back to the generic `DATABASE_URL`.
fn database_url(primary_key: &str) -> Result<SecretString, MigrateError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(MigrateError::MissingEnvVar(primary_key.to_string()))
}
