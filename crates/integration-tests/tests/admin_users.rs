//! Integration tests for the admin user panel.

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;

use fashion_reels_integration_tests::TestApp;

fn mock_users(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/users")
            .header("authorization", "Bearer admin-token");
        then.status(200).json_body(json!({
            "users": [
                {"id": "u1", "name": "Asha", "email": "asha@example.com", "verified": false},
                {"id": "u2", "name": "Ravi", "email": "ravi@example.com", "verified": true}
            ]
        }));
    });
}

/// Establish an admin session.
async fn login_admin(app: &mut TestApp) {
    let (status, _) = app
        .post(
            "/auth/session",
            json!({"token": "admin-token", "role": "admin", "name": "Root"}),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn the_panel_requires_an_admin_session() {
    let server = MockServer::start();
    let mut app = TestApp::admin(&server.base_url());

    let (status, _) = app.get("/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A token without the admin role is not enough.
    app.post(
        "/auth/session",
        json!({"token": "user-token", "role": "shopper"}),
    )
    .await;
    let (status, _) = app.get("/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_returns_the_backend_users() {
    let server = MockServer::start();
    mock_users(&server);
    let mut app = TestApp::admin(&server.base_url());
    login_admin(&mut app).await;

    let (status, panel) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);

    let users = panel["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["verified"], false);
    assert_eq!(users[1]["verified"], true);
}

#[tokio::test]
async fn a_successful_toggle_flips_immediately() {
    let server = MockServer::start();
    mock_users(&server);
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/u1/verify")
            .header("authorization", "Bearer admin-token")
            .json_body(json!({"verified": true}));
        then.status(200);
    });

    let mut app = TestApp::admin(&server.base_url());
    login_admin(&mut app).await;
    app.get("/users").await;

    let (status, panel) = app
        .post("/users/u1/verify", json!({"verified": true}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(panel["users"][0]["verified"], true);
    put.assert();
}

#[tokio::test]
async fn a_rejected_toggle_rolls_back_and_surfaces_the_error() {
    let server = MockServer::start();
    mock_users(&server);
    let put = server.mock(|when, then| {
        when.method(PUT).path("/u1/verify");
        then.status(500).body("rejected");
    });

    let mut app = TestApp::admin(&server.base_url());
    login_admin(&mut app).await;
    app.get("/users").await;

    let (status, body) = app
        .post("/users/u1/verify", json!({"verified": true}))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to update verification status");
    // The response carries the reverted list; no automatic retry happened.
    assert_eq!(body["users"][0]["verified"], false);
    assert_eq!(put.calls(), 1);
}

#[tokio::test]
async fn toggling_an_unknown_user_is_a_bad_request() {
    let server = MockServer::start();
    mock_users(&server);
    let mut app = TestApp::admin(&server.base_url());
    login_admin(&mut app).await;
    app.get("/users").await;

    let (status, _) = app
        .post("/users/ghost/verify", json!({"verified": true}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
