//! Cart route handlers.
//!
//! Every mutation follows the same shape: load the stored cart, apply the
//! change, save, and respond from the value that was actually persisted.
//! The handlers are thin; the sequencing lives in [`crate::cart::mutate`].

use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use fashion_reels_core::{Cart, CartTotals, LineItemId, format_amount};

use crate::cart::{CartStore, SessionCartStore, mutate};
use crate::error::Result;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: LineItemId,
    pub category: String,
    pub size: String,
    pub video_url: String,
    pub unit_price: String,
    pub line_total: String,
    pub quantity: u32,
}

/// Cart display data with totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Number of line entries (the badge count).
    pub count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = CartTotals::from_subtotal(cart.subtotal());
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.id,
                    category: line.category.to_string(),
                    size: line.size.to_string(),
                    video_url: line.video_url.clone(),
                    unit_price: format_amount(line.unit_price),
                    line_total: format_amount(line.line_total()),
                    quantity: line.quantity,
                })
                .collect(),
            subtotal: format_amount(totals.subtotal),
            tax: format_amount(totals.tax),
            total: format_amount(totals.total),
            count: cart.len(),
        }
    }
}

/// Body of the line-scoped mutation endpoints.
#[derive(Debug, Deserialize)]
pub struct LineAction {
    pub line_id: LineItemId,
}

/// Badge count fragment.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: usize,
}

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let cart = store.load().await?;
    Ok(Json(CartView::from(&cart)))
}

/// Increment a line's quantity.
#[instrument(skip(session))]
pub async fn increase(
    session: Session,
    Json(action): Json<LineAction>,
) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let cart = mutate(&store, |cart| cart.increase(action.line_id)).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Decrement a line's quantity, flooring at 1.
#[instrument(skip(session))]
pub async fn decrease(
    session: Session,
    Json(action): Json<LineAction>,
) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let cart = mutate(&store, |cart| cart.decrease(action.line_id)).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line outright.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(action): Json<LineAction>,
) -> Result<Json<CartView>> {
    let store = SessionCartStore::new(session);
    let cart = mutate(&store, |cart| cart.remove(action.line_id)).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let store = SessionCartStore::new(session);
    let cart = store.load().await?;
    Ok(Json(CartCount { count: cart.len() }))
}
