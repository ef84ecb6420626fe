//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` that captures server-side failures to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.
//! The variants map one-to-one onto the storefront's error taxonomy:
//! validation, network, not-found, gateway, and the unconfirmed-payment
//! state.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use fashion_reels_core::{OrderId, PaymentId};

use crate::backend::BackendError;
use crate::cart::CartStoreError;
use crate::checkout::{CheckoutError, ValidationErrors};
use crate::gateway::GatewayError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Form validation failed; field-scoped and recoverable.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A backend call failed.
    #[error("Backend error: {0}")]
    Backend(BackendError),

    /// The payment gateway handoff failed or was cancelled.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Payment succeeded at the gateway but confirmation failed.
    #[error("unconfirmed payment {payment_id} for order {order_id}")]
    Confirmation {
        order_id: OrderId,
        payment_id: PaymentId,
    },

    /// The cart store failed.
    #[error("Cart store error: {0}")]
    CartStore(#[from] CartStoreError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Shopper is not logged in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound => Self::NotFound("resource not found".to_owned()),
            other => Self::Backend(other),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(errors) => Self::Validation(errors),
            CheckoutError::EmptyCart => Self::BadRequest("cart is empty".to_owned()),
            CheckoutError::PhaseMismatch(order_id) => {
                Self::BadRequest(format!("no checkout attempt for order {order_id}"))
            }
            CheckoutError::Backend(err) => err.into(),
            CheckoutError::Gateway(err) => Self::Gateway(err),
            CheckoutError::Confirmation {
                order_id,
                payment_id,
                source,
            } => {
                tracing::error!(
                    %order_id,
                    %payment_id,
                    error = %source,
                    "payment confirmation failed"
                );
                Self::Confirmation {
                    order_id,
                    payment_id,
                }
            }
            CheckoutError::Store(err) => Self::CartStore(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Backend(_)
                | Self::Confirmation { .. }
                | Self::CartStore(_)
                | Self::Session(_)
                | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Backend(_) | Self::Confirmation { .. } => StatusCode::BAD_GATEWAY,
            Self::Gateway(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::CartStore(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Validation(errors) => json!({
                "error": "validation failed",
                "fields": errors,
            }),
            Self::Backend(_) => json!({ "error": "External service error" }),
            Self::Confirmation {
                order_id,
                payment_id,
            } => json!({
                "error": "Payment succeeded but confirmation failed. \
                          Please contact support - do not pay again.",
                "order_id": order_id,
                "payment_id": payment_id,
            }),
            Self::Gateway(err) => json!({ "error": err.to_string() }),
            Self::CartStore(_) | Self::Session(_) | Self::Internal(_) => {
                json!({ "error": "Internal server error" })
            }
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => {
                json!({ "error": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            status_of(AppError::NotFound("order".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("login".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::BadRequest("nope".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Backend(BackendError::Parse("bad".into()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Confirmation {
                order_id: OrderId::new("order_1"),
                payment_id: PaymentId::new("pay_1"),
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn backend_not_found_converts_to_not_found() {
        let err: AppError = BackendError::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn checkout_validation_converts_to_unprocessable() {
        let err: AppError = CheckoutError::EmptyCart.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
