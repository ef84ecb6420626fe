//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::BackendClient;
use crate::config::StorefrontConfig;
use crate::gateway::GatewayClient;
use crate::reels::ReelsService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The backend, gateway, and reels clients are
/// constructed exactly once here and reused for every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    backend: BackendClient,
    gateway: GatewayClient,
    reels: ReelsService,
}

impl AppState {
    /// Create a new application state from configuration and a pool.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let backend = BackendClient::new(&config.backend);
        let gateway = GatewayClient::new(&config.gateway);
        let reels = ReelsService::new(backend.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                backend,
                gateway,
                reels,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn gateway(&self) -> &GatewayClient {
        &self.inner.gateway
    }

    /// Get a reference to the reel listing service.
    #[must_use]
    pub fn reels(&self) -> &ReelsService {
        &self.inner.reels
    }
}
