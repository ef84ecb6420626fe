//! Admin identity extractor.
//!
//! Access control is a single boolean: the session must carry a bearer
//! token and the literal role string "admin". Anything richer is the
//! backend's concern.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::error::AdminError;
use crate::models::session_keys;

/// Identity material required by every admin route.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Bearer token for the backend's user endpoints.
    pub token: String,
}

impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AdminError::Internal(format!("session unavailable: {msg}")))?;

        let token: Option<String> = session.get(session_keys::AUTH_TOKEN).await?;
        let Some(token) = token else {
            return Err(AdminError::Unauthorized("Please login first".to_owned()));
        };

        let role: Option<String> = session.get(session_keys::USER_ROLE).await?;
        if role.as_deref() != Some("admin") {
            return Err(AdminError::Forbidden("Admin access required".to_owned()));
        }

        Ok(Self { token })
    }
}
