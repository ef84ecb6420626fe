//! Order lookup and history route handlers.
//!
//! The confirmation view arrives right after the gateway redirect, inside
//! the read-after-write window where the backend may not show the order
//! yet. Lookup therefore retries `NotFound` on the bounded order-lookup
//! policy before surfacing a terminal error; the manual lookup endpoint
//! gives the shopper a way to re-run the whole thing with an order id they
//! typed in.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use fashion_reels_core::{OrderId, OrderStatus, format_amount};

use crate::backend::BackendClient;
use crate::backend::types::{OrderProjection, ProductDetail};
use crate::error::{AppError, Result};
use crate::retry::{RetryPolicy, retry};
use crate::state::AppState;

/// Order display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order_id: OrderId,
    /// Total in minor units, as the backend reports it.
    pub amount: i64,
    /// Total in standard units, formatted ("510.00").
    pub amount_display: String,
    pub currency: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: OrderStatus,
    pub shipping_address: Option<fashion_reels_core::ShippingAddress>,
    pub products: Vec<ProductDetail>,
}

impl OrderView {
    fn new(order: OrderProjection, products: Vec<ProductDetail>) -> Self {
        let amount_display = format_amount(
            rust_decimal::Decimal::from(order.amount) / rust_decimal::Decimal::ONE_HUNDRED,
        );
        Self {
            order_id: order.order_id,
            amount: order.amount,
            amount_display,
            currency: order.currency,
            created_at: order.created_at,
            status: order.status,
            shipping_address: order.shipping_address,
            products,
        }
    }
}

/// Fetch an order with the bounded `NotFound` retry, then resolve its
/// products.
async fn lookup_order(backend: &BackendClient, order_id: &OrderId) -> Result<OrderView> {
    let order = retry(
        RetryPolicy::order_lookup(),
        crate::backend::BackendError::is_not_found,
        || backend.fetch_order(order_id),
    )
    .await
    .map_err(|err| match err {
        crate::backend::BackendError::NotFound => {
            AppError::NotFound(format!("order {order_id} not found"))
        }
        other => other.into(),
    })?;

    // Product resolution is best-effort: the order itself is the payload.
    let products = if order.products.is_empty() {
        Vec::new()
    } else {
        match backend.product_details(&order.products).await {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(error = %err, "failed to resolve order products");
                Vec::new()
            }
        }
    };

    Ok(OrderView::new(order, products))
}

/// Order confirmation view, reached after the gateway redirect.
#[instrument(skip(state))]
pub async fn confirmation(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderView>> {
    let view = lookup_order(state.backend(), &order_id).await?;
    Ok(Json(view))
}

/// Manual lookup body.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub order_id: String,
}

/// Manual order lookup: the shopper supplies an order id directly and the
/// whole retrying lookup runs again.
#[instrument(skip(state, request))]
pub async fn lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<OrderView>> {
    let trimmed = request.order_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Please enter an Order ID".to_owned()));
    }
    let view = lookup_order(state.backend(), &OrderId::new(trimmed)).await?;
    Ok(Json(view))
}

/// Query parameters for the order history view.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    /// Keep only orders with this status.
    pub status: Option<OrderStatus>,
}

/// Order history, optionally filtered by status.
#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<OrderView>>> {
    let orders = state.backend().order_history().await.map_err(AppError::from)?;

    let views = orders
        .into_iter()
        .filter(|order| params.status.is_none_or(|status| order.status == status))
        .map(|order| OrderView::new(order, Vec::new()))
        .collect();

    Ok(Json(views))
}
