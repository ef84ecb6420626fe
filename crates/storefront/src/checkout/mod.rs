//! Checkout orchestration.
//!
//! A checkout attempt walks a small state machine persisted in the session:
//!
//! ```text
//! FormEditing -> Validating -> AwaitingGateway -> AwaitingConfirmation
//!                                              -> Completed | Failed
//! ```
//!
//! `Validating` never survives a request (validation is synchronous), so
//! only the other phases are persisted. The cart is cleared exactly once,
//! after the backend has confirmed the payment; a confirmation failure
//! leaves the cart intact and parks the attempt in `Failed`, which is a
//! terminal contact-support state - confirming twice risks double
//! processing, so it is never retried.

pub mod forms;

pub use forms::{ShippingForm, ValidationErrors};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fashion_reels_core::{Cart, CartTotals, OrderId, PaymentId, UserId};

use crate::backend::types::{CreateOrderRequest, GatewayOrder, OrderProductInput};
use crate::backend::{BackendClient, BackendError};
use crate::cart::{CartStore, CartStoreError};
use crate::gateway::{GatewayClient, GatewayError, GatewayHandoff};

/// Persisted phase of the in-flight checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// No attempt in flight; the form is editable.
    #[default]
    FormEditing,
    /// A gateway order exists and the widget is (to be) open.
    AwaitingGateway { order_id: OrderId, amount: i64 },
    /// The widget reported success; confirmation is in flight.
    AwaitingConfirmation {
        order_id: OrderId,
        payment_id: PaymentId,
    },
    /// Confirmed; the cart has been cleared.
    Completed { order_id: OrderId },
    /// Payment succeeded at the gateway but confirmation failed.
    Failed {
        order_id: OrderId,
        payment_id: PaymentId,
    },
}

/// Errors from checkout orchestration.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Form validation failed; no network call was made.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Checkout was submitted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The callback does not belong to the attempt in the session.
    #[error("no matching checkout attempt for order {0}")]
    PhaseMismatch(OrderId),

    /// Creating the gateway order failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// The gateway handoff failed (bad signature, cancellation).
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Payment succeeded at the gateway but confirmation failed.
    ///
    /// Deliberately not retried; surfaced as a contact-support state.
    #[error("payment {payment_id} for order {order_id} is unconfirmed: {source}")]
    Confirmation {
        order_id: OrderId,
        payment_id: PaymentId,
        #[source]
        source: BackendError,
    },

    /// The cart store failed.
    #[error(transparent)]
    Store(#[from] CartStoreError),
}

/// Success callback payload from the gateway widget.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCallback {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub signature: String,
}

/// Result of starting a checkout attempt.
#[derive(Debug, Clone, Serialize)]
pub struct BeginCheckout {
    /// Phase to persist: `AwaitingGateway` for the new attempt.
    pub phase: CheckoutPhase,
    /// Widget payload for the client.
    pub handoff: GatewayHandoff,
    /// The totals the order was created with.
    pub totals: CartTotals,
}

/// Validate the form and create a gateway order from the current cart.
///
/// Runs `FormEditing -> Validating -> AwaitingGateway`. Validation failures
/// return before any network I/O.
///
/// # Errors
///
/// Returns [`CheckoutError::Validation`] with per-field messages,
/// [`CheckoutError::EmptyCart`] when there is nothing to buy, or a backend
/// error from order creation.
pub async fn begin<S: CartStore + ?Sized>(
    backend: &BackendClient,
    gateway: &GatewayClient,
    store: &S,
    user_id: UserId,
    form: &ShippingForm,
) -> Result<BeginCheckout, CheckoutError> {
    let address = form.validate().map_err(CheckoutError::Validation)?;

    let cart = store.load().await?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = CartTotals::from_subtotal(cart.subtotal());
    let request = CreateOrderRequest {
        amount: totals.total_minor_units(),
        user_id,
        products: snapshot_products(&cart),
        shipping_address: address.clone(),
    };

    let order: GatewayOrder = backend.create_order(&request).await?;
    tracing::info!(order_id = %order.id, amount = order.amount, "gateway order created");

    Ok(BeginCheckout {
        phase: CheckoutPhase::AwaitingGateway {
            order_id: order.id.clone(),
            amount: order.amount,
        },
        handoff: gateway.handoff(&order, &address),
        totals,
    })
}

/// Accept the gateway success callback.
///
/// Runs `AwaitingGateway -> AwaitingConfirmation`: the callback must match
/// the persisted attempt and carry a valid payment signature. Purely
/// local; the caller persists the returned phase before confirming, so a
/// crash mid-confirmation still knows a payment happened.
///
/// # Errors
///
/// Returns [`CheckoutError::PhaseMismatch`] if the callback does not match
/// the persisted attempt, or [`CheckoutError::Gateway`] for a bad
/// signature.
pub fn accept_callback(
    gateway: &GatewayClient,
    phase: &CheckoutPhase,
    callback: &GatewayCallback,
) -> Result<CheckoutPhase, CheckoutError> {
    match phase {
        CheckoutPhase::AwaitingGateway { order_id, .. } if *order_id == callback.order_id => {}
        _ => return Err(CheckoutError::PhaseMismatch(callback.order_id.clone())),
    }

    gateway.verify_payment_signature(
        &callback.order_id,
        &callback.payment_id,
        &callback.signature,
    )?;

    Ok(CheckoutPhase::AwaitingConfirmation {
        order_id: callback.order_id.clone(),
        payment_id: callback.payment_id.clone(),
    })
}

/// Confirm the accepted payment with the backend.
///
/// Runs `AwaitingConfirmation -> Completed | Failed`. The cart is cleared
/// only after the backend accepts the confirmation; a failure leaves it
/// untouched, and the attempt must be parked in [`CheckoutPhase::Failed`]
/// by the caller. Never retried: the payment already succeeded at the
/// gateway, so a second confirmation risks double processing.
///
/// # Errors
///
/// Returns [`CheckoutError::Confirmation`] when the backend rejects the
/// confirmation.
pub async fn confirm<S: CartStore + ?Sized>(
    backend: &BackendClient,
    store: &S,
    order_id: &OrderId,
    payment_id: &PaymentId,
) -> Result<CheckoutPhase, CheckoutError> {
    if let Err(source) = backend.confirm_payment(order_id, payment_id).await {
        return Err(CheckoutError::Confirmation {
            order_id: order_id.clone(),
            payment_id: payment_id.clone(),
            source,
        });
    }

    store.clear().await?;
    tracing::info!(%order_id, "checkout completed, cart cleared");

    Ok(CheckoutPhase::Completed {
        order_id: order_id.clone(),
    })
}

/// Snapshot the cart lines into the backend's order-product shape.
fn snapshot_products(cart: &Cart) -> Vec<OrderProductInput> {
    cart.lines()
        .iter()
        .map(|line| OrderProductInput {
            video_url: line.video_url.clone(),
            price: line.unit_price,
            quantity: line.quantity,
            category: line.category,
            size: line.size.clone(),
        })
        .collect()
}
