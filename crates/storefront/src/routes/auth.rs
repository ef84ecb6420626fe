//! Session bootstrap routes.
//!
//! Authentication itself is an external collaborator; these routes only
//! store the identity material it issued (token, user id, role, display
//! name) under the storefront's session keys, and clear it on logout.

use axum::Json;
use axum::http::StatusCode;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fashion_reels_core::UserId;

use crate::error::Result;
use crate::models::session_keys;

/// Identity material handed over by the auth flow.
#[derive(Debug, Deserialize)]
pub struct EstablishSession {
    pub token: String,
    pub user_id: UserId,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Store the issued identity material in the session.
#[instrument(skip(session, body))]
pub async fn establish(session: Session, Json(body): Json<EstablishSession>) -> Result<StatusCode> {
    session.insert(session_keys::AUTH_TOKEN, &body.token).await?;
    session.insert(session_keys::USER_ID, &body.user_id).await?;
    if let Some(role) = &body.role {
        session.insert(session_keys::USER_ROLE, role).await?;
    }
    if let Some(name) = &body.name {
        session.insert(session_keys::USER_NAME, name).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Clear the whole session, cart included.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}
