//! Application state shared across admin handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::UsersClient;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    users: UsersClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let users = UsersClient::new(&config.backend_url);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                users,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the users API client.
    #[must_use]
    pub fn users(&self) -> &UsersClient {
        &self.inner.users
    }
}
