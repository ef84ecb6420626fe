//! Integration tests for the checkout orchestration flow.

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use httpmock::prelude::*;
use serde_json::{Value, json};

use fashion_reels_integration_tests::{TestApp, gateway_signature};

fn mock_listing(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/videos/data/MEN/M");
        then.status(200).json_body(json!({
            "videoData": [
                {"id": "vid_1", "videoUrl": "https://cdn.example/1.mp4", "price": 500, "quantity": 3}
            ]
        }));
    });
}

fn shipping_form() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "address": "12 MG Road",
        "pincode": "560001",
        "city": "Bengaluru",
        "phone": "9876543210",
        "payment_method": "Online Payment"
    })
}

/// Establish a logged-in shopper and put one 500-rupee reel in the cart.
async fn seed_shopper(app: &mut TestApp) {
    let (status, _) = app
        .post(
            "/auth/session",
            json!({"token": "shopper-token", "user_id": "user_1", "name": "Asha"}),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.post("/reels/MEN/M/add", json!({"index": 0})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn the_full_checkout_flow_completes_and_clears_the_cart() {
    let server = MockServer::start();
    mock_listing(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/payment/create-order")
            .json_body_includes(r#"{"amount": 51000, "user_id": "user_1"}"#);
        then.status(200)
            .json_body(json!({"id": "order_1", "amount": 51000, "currency": "INR"}));
    });
    let confirm = server.mock(|when, then| {
        when.method(POST)
            .path("/api/payment/confirm")
            .json_body(json!({"order_id": "order_1", "payment_id": "pay_1"}));
        then.status(200);
    });

    let mut app = TestApp::storefront(&server.base_url());
    seed_shopper(&mut app).await;

    // Submit: validates, creates the gateway order, hands off to the widget.
    let (status, submitted) = app.post("/checkout", shipping_form()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["checkout"]["phase"], "awaiting_gateway");
    assert_eq!(submitted["order"]["order_id"], "order_1");
    assert_eq!(submitted["order"]["key"], "rzp_test_key");
    assert_eq!(submitted["totals"]["subtotal"], "500.00");
    assert_eq!(submitted["totals"]["tax"], "10.00");
    assert_eq!(submitted["totals"]["total"], "510.00");
    create.assert();

    // Gateway success callback: confirm, clear the cart, redirect.
    let (status, headers, _) = app
        .request(
            axum::http::Method::POST,
            "/checkout/callback",
            Some(json!({
                "order_id": "order_1",
                "payment_id": "pay_1",
                "signature": gateway_signature("order_1", "pay_1"),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        headers.get(LOCATION).unwrap(),
        "/orders/confirmation/order_1"
    );
    confirm.assert();

    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 0);

    let (_, summary) = app.get("/checkout").await;
    assert_eq!(summary["checkout"]["phase"], "completed");
}

#[tokio::test]
async fn validation_failures_are_field_scoped_and_make_no_network_call() {
    let server = MockServer::start();
    mock_listing(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/payment/create-order");
        then.status(200)
            .json_body(json!({"id": "order_1", "amount": 51000, "currency": "INR"}));
    });

    let mut app = TestApp::storefront(&server.base_url());
    seed_shopper(&mut app).await;

    let mut form = shipping_form();
    form["pincode"] = json!("1234");

    let (status, body) = app.post("/checkout", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["pincode"], "Valid 6-digit Pincode required");
    assert!(body["fields"].get("name").is_none());
    assert_eq!(create.calls(), 0);

    // The cart is untouched and the attempt stays editable.
    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn checkout_requires_a_logged_in_shopper() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    app.post("/reels/MEN/M/add", json!({"index": 0})).await;

    let (status, body) = app.post("/checkout", shipping_form()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Please login to continue");
}

#[tokio::test]
async fn confirmation_failure_is_terminal_and_keeps_the_cart() {
    let server = MockServer::start();
    mock_listing(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/payment/create-order");
        then.status(200)
            .json_body(json!({"id": "order_1", "amount": 51000, "currency": "INR"}));
    });
    let confirm = server.mock(|when, then| {
        when.method(POST).path("/api/payment/confirm");
        then.status(500).body("backend down");
    });

    let mut app = TestApp::storefront(&server.base_url());
    seed_shopper(&mut app).await;
    app.post("/checkout", shipping_form()).await;

    let (status, body) = app
        .post(
            "/checkout/callback",
            json!({
                "order_id": "order_1",
                "payment_id": "pay_1",
                "signature": gateway_signature("order_1", "pay_1"),
            }),
        )
        .await;

    // Distinct contact-support failure: the payment went through at the
    // gateway, so the client must not pay again.
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("contact support"));
    assert_eq!(body["order_id"], "order_1");
    assert_eq!(body["payment_id"], "pay_1");

    // Exactly one confirmation attempt, cart intact, attempt parked in
    // the failed state.
    assert_eq!(confirm.calls(), 1);
    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 1);
    let (_, summary) = app.get("/checkout").await;
    assert_eq!(summary["checkout"]["phase"], "failed");
}

#[tokio::test]
async fn a_forged_callback_signature_returns_to_editing() {
    let server = MockServer::start();
    mock_listing(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/payment/create-order");
        then.status(200)
            .json_body(json!({"id": "order_1", "amount": 51000, "currency": "INR"}));
    });
    let confirm = server.mock(|when, then| {
        when.method(POST).path("/api/payment/confirm");
        then.status(200);
    });

    let mut app = TestApp::storefront(&server.base_url());
    seed_shopper(&mut app).await;
    app.post("/checkout", shipping_form()).await;

    let (status, _) = app
        .post(
            "/checkout/callback",
            json!({
                "order_id": "order_1",
                "payment_id": "pay_1",
                "signature": gateway_signature("order_1", "pay_forged"),
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(confirm.calls(), 0);

    let (_, summary) = app.get("/checkout").await;
    assert_eq!(summary["checkout"]["phase"], "form_editing");
}

#[tokio::test]
async fn dismissing_the_widget_cancels_back_to_editing() {
    let server = MockServer::start();
    mock_listing(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/payment/create-order");
        then.status(200)
            .json_body(json!({"id": "order_1", "amount": 51000, "currency": "INR"}));
    });

    let mut app = TestApp::storefront(&server.base_url());
    seed_shopper(&mut app).await;
    app.post("/checkout", shipping_form()).await;

    let (status, body) = app.post("/checkout/cancel", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checkout"]["phase"], "form_editing");
    assert_eq!(body["message"], "Payment cancelled");

    // The cart survives a cancellation.
    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}
