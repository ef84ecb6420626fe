//! Wire types for the FashionReels backend REST API.
//!
//! Field names follow the backend's camelCase JSON contract via explicit
//! renames; everything else stays snake_case Rust.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fashion_reels_core::{
    Category, OrderId, OrderStatus, PaymentId, ProductRef, ShippingAddress, Size, UserId,
};

/// One entry of a category+size reel listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelItem {
    /// Opaque product/video identifier.
    pub id: ProductRef,
    /// Playable video URL.
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    /// Unit price in standard currency units.
    pub price: Decimal,
    /// Units in stock; 0 means the reel cannot be added to the cart.
    pub quantity: u32,
}

/// Response envelope of `GET /api/videos/data/{CATEGORY}/{SIZE}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDataResponse {
    #[serde(rename = "videoData")]
    pub video_data: Vec<ReelItem>,
}

/// One cart line as sent to `POST /api/payment/create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProductInput {
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    /// Unit price as a JSON number, the way the backend expects it.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub category: Category,
    pub size: Size,
}

/// Request body of `POST /api/payment/create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Order total in integer minor units.
    pub amount: i64,
    pub user_id: UserId,
    pub products: Vec<OrderProductInput>,
    #[serde(rename = "shippingAddress")]
    pub shipping_address: ShippingAddress,
}

/// Gateway order issued by the backend in response to create-order.
///
/// Distinct from the backend's own order record: this is the
/// payment-provider-side handle the checkout widget is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: OrderId,
    /// Amount in integer minor units, echoed back by the backend.
    pub amount: i64,
    /// ISO currency code, e.g. "INR".
    pub currency: String,
}

/// Request body of `POST /api/payment/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
}

/// Read-only order projection from `GET /api/orders/{orderId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProjection {
    pub order_id: OrderId,
    /// Total in integer minor units.
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "shippingAddress", default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Product refs on the order; resolved separately via product details.
    #[serde(default)]
    pub products: Vec<ProductRef>,
}

/// Request body of `POST /api/products/details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailsRequest {
    #[serde(rename = "productIds")]
    pub product_ids: Vec<ProductRef>,
}

/// One resolved product from `POST /api/products/details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductRef,
    pub name: String,
    /// Price in integer minor units.
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reel_listing_deserializes_from_backend_shape() {
        let body = json!({
            "videoData": [
                {"id": "vid_1", "videoUrl": "https://cdn.example/1.mp4", "price": 500, "quantity": 3},
                {"id": "vid_2", "videoUrl": "https://cdn.example/2.mp4", "price": 19.99, "quantity": 0}
            ]
        });
        let listing: VideoDataResponse = serde_json::from_value(body).unwrap();
        assert_eq!(listing.video_data.len(), 2);
        assert_eq!(listing.video_data[0].price, Decimal::from(500));
        assert_eq!(listing.video_data[1].quantity, 0);
    }

    #[test]
    fn order_products_serialize_prices_as_numbers() {
        let product = OrderProductInput {
            video_url: "https://cdn.example/1.mp4".to_string(),
            price: "500".parse().unwrap(),
            quantity: 2,
            category: Category::Men,
            size: Size::parse("M").unwrap(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value["price"].is_number());
        assert_eq!(value["category"], "MEN");
        assert_eq!(value["videoUrl"], "https://cdn.example/1.mp4");
    }

    #[test]
    fn order_projection_tolerates_missing_optionals() {
        let body = json!({
            "order_id": "order_Q1S5ZBWKe1dBGT",
            "amount": 51000,
            "createdAt": "2026-03-01T10:15:00Z"
        });
        let order: OrderProjection = serde_json::from_value(body).unwrap();
        assert_eq!(order.amount, 51_000);
        assert!(order.shipping_address.is_none());
        assert_eq!(order.status, OrderStatus::Created);
        assert!(order.products.is_empty());
    }
}
