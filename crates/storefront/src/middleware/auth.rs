//! Shopper identity extractor.
//!
//! Identity material is issued by the external auth flow and stored under
//! separate session keys; this extractor assembles it and rejects requests
//! that require a logged-in shopper.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use fashion_reels_core::UserId;

use crate::error::AppError;
use crate::models::session_keys;

pub use crate::models::CurrentShopper;

impl<S> FromRequestParts<S> for CurrentShopper
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("session unavailable: {msg}")))?;

        let user_id: Option<UserId> = session.get(session_keys::USER_ID).await?;
        let Some(user_id) = user_id else {
            return Err(AppError::Unauthorized("Please login to continue".to_owned()));
        };

        let name: Option<String> = session.get(session_keys::USER_NAME).await?;
        let role: Option<String> = session.get(session_keys::USER_ROLE).await?;

        Ok(Self {
            user_id,
            name,
            role,
        })
    }
}
