//! Database pool for admin session storage.
//!
//! The admin panel keeps no tables of its own; `PostgreSQL` only backs the
//! tower-sessions store. The sessions table is created explicitly via:
//!
//! ```bash
//! cargo run -p fashion-reels-cli -- migrate admin
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
