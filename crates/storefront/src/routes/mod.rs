//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (database)
//!
//! # Reels
//! GET  /reels                          - Redirect to the MEN/M default
//! GET  /reels/{category}/{size}        - Browse the carousel (?index=N)
//! POST /reels/{category}/{size}/add    - Add the viewed reel to the cart
//! POST /reels/{category}/{size}/visibility - Playback commands from ratios
//!
//! # Cart
//! GET  /cart                           - Cart with totals
//! POST /cart/increase                  - Increment a line (by line_id)
//! POST /cart/decrease                  - Decrement a line, floor 1
//! POST /cart/remove                    - Remove a line outright
//! GET  /cart/count                     - Cart badge count
//!
//! # Checkout
//! GET  /checkout                       - Summary + current phase
//! POST /checkout                       - Validate form, create gateway order
//! POST /checkout/callback              - Gateway success callback
//! POST /checkout/cancel                - Widget dismissed
//!
//! # Orders
//! GET  /orders                         - Order history (?status=Shipped)
//! GET  /orders/confirmation/{order_id} - Post-payment lookup (retrying)
//! POST /orders/lookup                  - Manual lookup by typed order id
//!
//! # Session bootstrap
//! POST /auth/session                   - Store issued identity material
//! POST /auth/logout                    - Clear the session
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod reels;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the reel browser routes.
pub fn reel_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reels::default_browse))
        .route("/{category}/{size}", get(reels::browse))
        .route("/{category}/{size}/add", post(reels::add_to_cart))
        .route("/{category}/{size}/visibility", post(reels::visibility))
}

/// Create the cart routes.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit))
        .route("/callback", post(checkout::callback))
        .route("/cancel", post(checkout::cancel))
}

/// Create the order routes.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::history))
        .route("/confirmation/{order_id}", get(orders::confirmation))
        .route("/lookup", post(orders::lookup))
}

/// Create the session bootstrap routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::establish))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/reels", reel_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/auth", auth_routes())
}
