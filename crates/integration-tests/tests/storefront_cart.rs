//! Integration tests for the reel browser and cart flow.
//!
//! The backend is an httpmock server; the storefront router runs
//! in-process with in-memory sessions.

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;

use fashion_reels_integration_tests::TestApp;

/// Mount the MEN/M listing: one in-stock reel, one sold out.
fn mock_listing(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/videos/data/MEN/M");
        then.status(200).json_body(json!({
            "videoData": [
                {"id": "vid_1", "videoUrl": "https://cdn.example/1.mp4", "price": 500, "quantity": 3},
                {"id": "vid_2", "videoUrl": "https://cdn.example/2.mp4", "price": 250, "quantity": 0}
            ]
        }));
    });
}

#[tokio::test]
async fn add_to_cart_appends_and_updates_the_badge() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    let (status, result) = app.post("/reels/MEN/M/add", json!({"index": 0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["added"], true);
    assert_eq!(result["cart_count"], 1);

    // A second add appends another entry; the badge counts entries.
    let (_, result) = app.post("/reels/MEN/M/add", json!({"index": 0})).await;
    assert_eq!(result["cart_count"], 2);

    let (status, count) = app.get("/cart/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn out_of_stock_reels_cannot_be_added() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    let (status, result) = app.post("/reels/MEN/M/add", json!({"index": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["added"], false);
    assert_eq!(result["cart_count"], 0);
}

#[tokio::test]
async fn quantity_mutations_floor_at_one_and_removal_deletes() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    app.post("/reels/MEN/M/add", json!({"index": 0})).await;

    let (_, cart) = app.get("/cart").await;
    let line_id = cart["items"][0]["id"].clone();
    assert_eq!(cart["items"][0]["quantity"], 1);

    // Decreasing at quantity 1 is a no-op.
    let (_, cart) = app
        .post("/cart/decrease", json!({"line_id": line_id}))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 1);

    let (_, cart) = app
        .post("/cart/increase", json!({"line_id": line_id}))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 2);

    let (_, cart) = app
        .post("/cart/decrease", json!({"line_id": line_id}))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 1);

    let (_, cart) = app.post("/cart/remove", json!({"line_id": line_id})).await;
    assert_eq!(cart["count"], 0);
    assert_eq!(cart["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn totals_are_the_exact_sum_plus_two_percent_tax() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    // Empty cart: all totals are 0.00.
    let (_, cart) = app.get("/cart").await;
    assert_eq!(cart["subtotal"], "0.00");
    assert_eq!(cart["total"], "0.00");

    app.post("/reels/MEN/M/add", json!({"index": 0})).await;

    let (_, cart) = app.get("/cart").await;
    assert_eq!(cart["subtotal"], "500.00");
    assert_eq!(cart["tax"], "10.00");
    assert_eq!(cart["total"], "510.00");

    // 2 x 500: subtotal 1000.00, tax 20.00.
    let (_, cart) = app.get("/cart").await;
    let line_id = cart["items"][0]["id"].clone();
    let (_, cart) = app
        .post("/cart/increase", json!({"line_id": line_id}))
        .await;
    assert_eq!(cart["subtotal"], "1000.00");
    assert_eq!(cart["tax"], "20.00");
    assert_eq!(cart["total"], "1020.00");
}

#[tokio::test]
async fn mutations_survive_across_requests() {
    let server = MockServer::start();
    mock_listing(&server);
    let mut app = TestApp::storefront(&server.base_url());

    app.post("/reels/MEN/M/add", json!({"index": 0})).await;

    // Every mutation is durable: a fresh read sees the same cart.
    let (_, first) = app.get("/cart").await;
    let (_, second) = app.get("/cart").await;
    assert_eq!(first, second);
    assert_eq!(second["count"], 1);
}
