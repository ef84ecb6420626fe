//! FashionReels backend API client.
//!
//! A thin typed client over the backend's REST surface using `reqwest`.
//! Response bodies are read as text first so parse failures can be logged
//! with context. The client is cheap to clone; the underlying connection
//! pool is shared.

pub mod types;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use fashion_reels_core::{Category, OrderId, PaymentId, ProductRef, Size};

use crate::config::BackendConfig;
use types::{
    ConfirmPaymentRequest, CreateOrderRequest, GatewayOrder, OrderProjection, ProductDetail,
    ProductDetailsRequest, ReelItem, VideoDataResponse,
};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The requested resource does not exist (HTTP 404).
    ///
    /// Order lookup retries on this variant only; everything else surfaces
    /// immediately.
    #[error("resource not found")]
    NotFound,

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl BackendError {
    /// Whether this error is the eventual-consistency `NotFound` window.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Client for the FashionReels backend REST API.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Fetch the reel listing for a category+size pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(category = %category, size = %size))]
    pub async fn list_reels(
        &self,
        category: Category,
        size: &Size,
    ) -> Result<Vec<ReelItem>, BackendError> {
        let url = format!("{}/api/videos/data/{category}/{size}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let listing: VideoDataResponse = read_json(response).await?;
        Ok(listing.video_data)
    }

    /// Create a gateway order for the given cart snapshot and total.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<GatewayOrder, BackendError> {
        let url = format!("{}/api/payment/create-order", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        read_json(response).await
    }

    /// Confirm a completed gateway payment.
    ///
    /// This call is NOT idempotent-safe and must never be retried; the
    /// caller maps a failure here to the "contact support" state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn confirm_payment(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<(), BackendError> {
        let url = format!("{}/api/payment/confirm", self.base_url);
        let body = ConfirmPaymentRequest {
            order_id: order_id.clone(),
            payment_id: payment_id.clone(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        read_success(response).await
    }

    /// Fetch a single order projection.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] while the order is not yet
    /// visible, or another error for any other failure.
    #[instrument(skip(self))]
    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<OrderProjection, BackendError> {
        let url = format!("{}/api/orders/{order_id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    /// Resolve product refs to display details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    pub async fn product_details(
        &self,
        product_ids: &[ProductRef],
    ) -> Result<Vec<ProductDetail>, BackendError> {
        let url = format!("{}/api/products/details", self.base_url);
        let body = ProductDetailsRequest {
            product_ids: product_ids.to_vec(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        read_json(response).await
    }

    /// Fetch the shopper's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn order_history(&self) -> Result<Vec<OrderProjection>, BackendError> {
        let url = format!("{}/api/users/orders", self.base_url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}

/// Check the status and parse a JSON body, logging diagnostics on failure.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound);
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "backend returned non-success status"
        );
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "failed to parse backend response"
        );
        BackendError::Parse(e.to_string())
    })
}

/// Check the status of a response whose body we do not care about.
async fn read_success(response: reqwest::Response) -> Result<(), BackendError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: server.base_url(),
        })
    }

    #[tokio::test]
    async fn list_reels_hits_the_upper_cased_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/videos/data/WOMEN/XL");
            then.status(200).json_body(json!({
                "videoData": [
                    {"id": "vid_9", "videoUrl": "https://cdn.example/9.mp4", "price": 750, "quantity": 2}
                ]
            }));
        });

        let items = client(&server)
            .list_reels(Category::Women, &Size::parse("xl").unwrap())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ProductRef::new("vid_9"));
    }

    #[tokio::test]
    async fn fetch_order_maps_404_to_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/orders/order_missing");
            then.status(404);
        });

        let err = client(&server)
            .fetch_order(&OrderId::new("order_missing"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn non_success_statuses_become_api_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/payment/confirm");
            then.status(500).body("boom");
        });

        let err = client(&server)
            .confirm_payment(&OrderId::new("order_1"), &PaymentId::new("pay_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn malformed_bodies_become_parse_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/orders/order_1");
            then.status(200).body("not json");
        });

        let err = client(&server)
            .fetch_order(&OrderId::new("order_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Parse(_)));
    }
}
