//! Payment gateway integration.
//!
//! The gateway owns the actual payment UI; this side only prepares the
//! handoff payload the widget is opened with and verifies the signature the
//! gateway attaches to its success callback. The client is built once at
//! startup and reused for every checkout, so the widget bootstrap data is
//! always served from the same configuration.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use fashion_reels_core::{OrderId, PaymentId, ShippingAddress};

use crate::backend::types::GatewayOrder;
use crate::config::GatewayConfig;

type HmacSha256 = Hmac<Sha256>;

/// Display name shown in the gateway widget.
const MERCHANT_NAME: &str = "FashionReels";

/// Purchase description shown in the gateway widget.
const PURCHASE_DESCRIPTION: &str = "Reel purchase";

/// Errors from the gateway handoff.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The success callback's signature is not valid hex.
    #[error("malformed payment signature")]
    MalformedSignature,

    /// The success callback's signature does not match the order/payment pair.
    #[error("invalid payment signature")]
    InvalidSignature,

    /// The shopper dismissed the payment widget.
    #[error("payment cancelled")]
    Cancelled,
}

/// Payload the checkout widget is opened with.
///
/// Everything here is safe to hand to the browser; the key secret never
/// leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayHandoff {
    /// Gateway public key id.
    pub key: String,
    /// Backend-issued gateway order id.
    pub order_id: OrderId,
    /// Amount in integer minor units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Merchant display name.
    pub name: String,
    /// Purchase description.
    pub description: String,
    /// URL of the hosted checkout script.
    pub script_url: String,
    /// Prefill values for the widget's contact fields.
    pub prefill: GatewayPrefill,
}

/// Contact prefill for the widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Client for the payment gateway handoff.
#[derive(Clone)]
pub struct GatewayClient {
    key_id: String,
    key_secret: SecretString,
    checkout_js_url: String,
}

impl GatewayClient {
    /// Create a gateway client from configuration.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            checkout_js_url: config.checkout_js_url.clone(),
        }
    }

    /// Build the widget payload for a backend-issued gateway order.
    #[must_use]
    pub fn handoff(&self, order: &GatewayOrder, address: &ShippingAddress) -> GatewayHandoff {
        GatewayHandoff {
            key: self.key_id.clone(),
            order_id: order.id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_owned(),
            description: PURCHASE_DESCRIPTION.to_owned(),
            script_url: self.checkout_js_url.clone(),
            prefill: GatewayPrefill {
                name: address.name.clone(),
                email: address.email.to_string(),
                contact: address.phone.to_string(),
            },
        }
    }

    /// Verify the signature the gateway attached to its success callback.
    ///
    /// The gateway signs `"{order_id}|{payment_id}"` with the key secret
    /// (HMAC-SHA256, hex-encoded).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedSignature`] if the signature is not
    /// hex, or [`GatewayError::InvalidSignature`] if it does not verify.
    pub fn verify_payment_signature(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
        signature: &str,
    ) -> Result<(), GatewayError> {
        let provided = hex::decode(signature).map_err(|_| GatewayError::MalformedSignature)?;

        let mut mac = HmacSha256::new_from_slice(self.key_secret.expose_secret().as_bytes())
            .map_err(|_| GatewayError::InvalidSignature)?;
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        mac.verify_slice(&provided)
            .map_err(|_| GatewayError::InvalidSignature)
    }
}
