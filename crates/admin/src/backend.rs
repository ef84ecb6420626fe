//! Backend users API client.
//!
//! The admin panel consumes exactly two bearer-authenticated endpoints:
//! the user list and the verification toggle. The toggle PUT is idempotent
//! on the backend side, but the panel still never retries it - rollback
//! plus a surfaced error is the contract.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use fashion_reels_core::UserId;

/// A registered user as the admin panel sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub verified: bool,
}

/// Response envelope of `GET /api/users`.
#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<UserRecord>,
}

/// Request body of `PUT /{userId}/verify`.
#[derive(Debug, Serialize)]
struct VerifyRequest {
    verified: bool,
}

/// Errors that can occur when talking to the users API.
#[derive(Debug, Error)]
pub enum UsersError {
    /// The request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the backend's user management surface.
#[derive(Clone)]
pub struct UsersClient {
    client: reqwest::Client,
    base_url: String,
}

impl UsersClient {
    /// Create a new users client.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch all registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, token))]
    pub async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>, UsersError> {
        let url = format!("{}/api/users", self.base_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: UsersResponse =
            serde_json::from_str(&body).map_err(|e| UsersError::Parse(e.to_string()))?;
        Ok(parsed.users)
    }

    /// Set a user's verification flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token))]
    pub async fn set_verified(
        &self,
        token: &str,
        user_id: &UserId,
        verified: bool,
    ) -> Result<(), UsersError> {
        let url = format!("{}/{user_id}/verify", self.base_url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(&VerifyRequest { verified })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        Ok(())
    }
}

fn api_error(status: StatusCode, body: &str) -> UsersError {
    UsersError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_users_sends_the_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/users")
                .header("authorization", "Bearer admin-token");
            then.status(200).json_body(json!({
                "users": [
                    {"id": "u1", "name": "Asha", "email": "asha@example.com", "verified": false}
                ]
            }));
        });

        let users = UsersClient::new(&server.base_url())
            .list_users("admin-token")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(users.len(), 1);
        assert!(!users[0].verified);
    }

    #[tokio::test]
    async fn mongo_style_ids_are_accepted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/users");
            then.status(200).json_body(json!({
                "users": [
                    {"_id": "6600aa", "name": "Ravi", "email": "ravi@example.com", "verified": true}
                ]
            }));
        });

        let users = UsersClient::new(&server.base_url())
            .list_users("admin-token")
            .await
            .unwrap();

        assert_eq!(users[0].id, UserId::new("6600aa"));
    }

    #[tokio::test]
    async fn set_verified_puts_to_the_verify_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/u1/verify")
                .json_body(json!({"verified": true}));
            then.status(200);
        });

        UsersClient::new(&server.base_url())
            .set_verified("admin-token", &UserId::new("u1"), true)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn rejections_surface_as_api_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/u1/verify");
            then.status(403).body("nope");
        });

        let err = UsersClient::new(&server.base_url())
            .set_verified("admin-token", &UserId::new("u1"), true)
            .await
            .unwrap_err();

        assert!(matches!(err, UsersError::Api { status: 403, .. }));
    }
}
