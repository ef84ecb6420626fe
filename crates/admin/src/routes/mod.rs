//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database)
//!
//! # Users
//! GET  /users               - List registered users
//! POST /users/{id}/verify   - Optimistically toggle verification
//!
//! # Session bootstrap
//! POST /auth/session        - Store issued identity material
//! POST /auth/logout         - Clear the session
//! ```

pub mod auth;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user management routes.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}/verify", post(users::toggle_verify))
}

/// Create the session bootstrap routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::establish))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/auth", auth_routes())
}
