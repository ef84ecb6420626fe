//! Checkout route handlers.
//!
//! The handlers keep the session's checkout phase in step with the
//! orchestrator: submit creates the gateway order and parks the attempt in
//! `AwaitingGateway`; the widget's success callback drives confirmation and
//! either completes the attempt or parks it in `Failed`; dismissing the
//! widget returns to `FormEditing`.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartStore, SessionCartStore};
use crate::checkout::{self, CheckoutError, CheckoutPhase, GatewayCallback, ShippingForm};
use crate::error::{AppError, Result};
use crate::middleware::CurrentShopper;
use crate::models::session_keys;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Load the persisted checkout phase, defaulting to form editing.
async fn load_phase(session: &Session) -> Result<CheckoutPhase> {
    Ok(session
        .get::<CheckoutPhase>(session_keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

/// Persist the checkout phase.
async fn save_phase(session: &Session, phase: &CheckoutPhase) -> Result<()> {
    session.insert(session_keys::CHECKOUT, phase).await?;
    Ok(())
}

/// Checkout summary: the cart with totals plus the current phase.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<serde_json::Value>> {
    let phase = load_phase(&session).await?;
    let store = SessionCartStore::new(session);
    let cart = store.load().await?;

    Ok(Json(json!({
        "cart": CartView::from(&cart),
        "checkout": phase,
    })))
}

/// Submit the shipping form and create a gateway order.
///
/// Validation failures are field-scoped and make no network call; on
/// success the response carries the widget handoff payload.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    shopper: CurrentShopper,
    Json(form): Json<ShippingForm>,
) -> Result<Json<serde_json::Value>> {
    let store = SessionCartStore::new(session.clone());

    let begun = checkout::begin(
        state.backend(),
        state.gateway(),
        &store,
        shopper.user_id,
        &form,
    )
    .await
    .map_err(AppError::from)?;

    save_phase(&session, &begun.phase).await?;

    Ok(Json(json!({
        "checkout": begun.phase,
        "order": begun.handoff,
        "totals": {
            "subtotal": fashion_reels_core::format_amount(begun.totals.subtotal),
            "tax": fashion_reels_core::format_amount(begun.totals.tax),
            "total": fashion_reels_core::format_amount(begun.totals.total),
        },
    })))
}

/// Success callback from the payment gateway widget.
///
/// On confirmed success the cart is cleared and the shopper is redirected
/// to the order confirmation view. A confirmation failure parks the
/// attempt in `Failed` and surfaces the contact-support error; it is never
/// retried.
#[instrument(skip(state, session, callback))]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Json(callback): Json<GatewayCallback>,
) -> Result<Response> {
    let phase = load_phase(&session).await?;

    // AwaitingGateway -> AwaitingConfirmation: match the attempt and
    // verify the payment signature before trusting the callback.
    let accepted = match checkout::accept_callback(state.gateway(), &phase, &callback) {
        Ok(accepted) => accepted,
        Err(err @ CheckoutError::Gateway(_)) => {
            // Bad handoff: back to the editable form.
            save_phase(&session, &CheckoutPhase::FormEditing).await?;
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    save_phase(&session, &accepted).await?;

    let CheckoutPhase::AwaitingConfirmation {
        order_id,
        payment_id,
    } = &accepted
    else {
        return Err(AppError::Internal("unexpected checkout phase".to_owned()));
    };

    let store = SessionCartStore::new(session.clone());
    match checkout::confirm(state.backend(), &store, order_id, payment_id).await {
        Ok(completed) => {
            save_phase(&session, &completed).await?;
            Ok(Redirect::to(&format!("/orders/confirmation/{order_id}")).into_response())
        }
        Err(err) => {
            if matches!(err, CheckoutError::Confirmation { .. }) {
                save_phase(
                    &session,
                    &CheckoutPhase::Failed {
                        order_id: order_id.clone(),
                        payment_id: payment_id.clone(),
                    },
                )
                .await?;
            }
            Err(err.into())
        }
    }
}

/// The shopper dismissed the payment widget.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Json<serde_json::Value>> {
    let phase = load_phase(&session).await?;
    if let CheckoutPhase::AwaitingGateway { order_id, .. } = &phase {
        tracing::info!(%order_id, "checkout cancelled by shopper");
    }
    save_phase(&session, &CheckoutPhase::FormEditing).await?;

    Ok(Json(json!({
        "checkout": CheckoutPhase::FormEditing,
        "message": "Payment cancelled",
    })))
}
