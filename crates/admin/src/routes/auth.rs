//! Session bootstrap routes.
//!
//! Mirrors the storefront's: the external auth flow hands over a token and
//! role, this service only stores them.

use axum::Json;
use axum::http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session_keys;

/// Identity material handed over by the auth flow.
#[derive(Debug, Deserialize)]
pub struct EstablishSession {
    pub token: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Store the issued identity material in the session.
#[instrument(skip(session, body))]
pub async fn establish(session: Session, Json(body): Json<EstablishSession>) -> Result<StatusCode> {
    session.insert(session_keys::AUTH_TOKEN, &body.token).await?;
    if let Some(role) = &body.role {
        session.insert(session_keys::USER_ROLE, role).await?;
    }
    if let Some(name) = &body.name {
        session.insert(session_keys::USER_NAME, name).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the whole session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}
