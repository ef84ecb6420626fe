//! Test harness for driving the FashionReels routers in-process.
//!
//! Both services are built with their real route trees and an in-memory
//! session store; the backend is expected to be an `httpmock` server whose
//! base URL is passed in. The harness persists the session cookie across
//! requests, so multi-step flows (add to cart, then check out) behave as
//! they would for one browser.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Gateway key secret used by the storefront harness.
pub const TEST_GATEWAY_SECRET: &str = "kX3vQ9mL2nR8pT5wZ1cF7hJ4bD6gS0aY";

/// Sign an order/payment pair the way the gateway does.
#[must_use]
pub fn gateway_signature(order_id: &str, payment_id: &str) -> String {
    use hmac::{Hmac, Mac};
    let mut mac = Hmac::<sha2::Sha256>::new_from_slice(TEST_GATEWAY_SECRET.as_bytes()).unwrap();
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// A service under test plus its browser-like cookie jar.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the storefront against the given backend base URL.
    #[must_use]
    pub fn storefront(backend_url: &str) -> Self {
        use fashion_reels_storefront::config::{
            BackendConfig, GatewayConfig, StorefrontConfig,
        };
        use fashion_reels_storefront::state::AppState;

        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_owned(),
            session_secret: SecretString::from("k".repeat(32)),
            backend: BackendConfig {
                base_url: backend_url.trim_end_matches('/').to_owned(),
            },
            gateway: GatewayConfig {
                key_id: "rzp_test_key".to_owned(),
                key_secret: SecretString::from(TEST_GATEWAY_SECRET),
                checkout_js_url: "https://checkout.example/v1/checkout.js".to_owned(),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let pool = lazy_pool();
        let state = AppState::new(config, pool);
        let router = fashion_reels_storefront::app(state).layer(session_layer());

        Self {
            router,
            cookie: None,
        }
    }

    /// Build the admin panel against the given backend base URL.
    #[must_use]
    pub fn admin(backend_url: &str) -> Self {
        use fashion_reels_admin::config::AdminConfig;
        use fashion_reels_admin::state::AppState;

        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3001".to_owned(),
            session_secret: SecretString::from("k".repeat(32)),
            backend_url: backend_url.trim_end_matches('/').to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let pool = lazy_pool();
        let state = AppState::new(config, pool);
        let router = fashion_reels_admin::app(state).layer(session_layer());

        Self {
            router,
            cookie: None,
        }
    }

    /// Issue one request, carrying and capturing the session cookie.
    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let request = match body {
            Some(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&value).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();

        if let Some(set_cookie) = headers.get(SET_COOKIE)
            && let Ok(raw) = set_cookie.to_str()
            && let Some(pair) = raw.split(';').next()
        {
            self.cookie = Some(pair.to_owned());
        }

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, headers, value)
    }

    /// Convenience GET.
    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        let (status, _, value) = self.request(Method::GET, uri, None).await;
        (status, value)
    }

    /// Convenience POST with a JSON body.
    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, value) = self.request(Method::POST, uri, Some(body)).await;
        (status, value)
    }
}

/// A pool that never actually connects; sessions are in memory and the
/// readiness probe is not exercised here.
fn lazy_pool() -> sqlx::PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap()
}

/// In-memory session layer standing in for the Postgres-backed one.
fn session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default()).with_secure(false)
}
