//! User management route handlers.
//!
//! The list is fetched from the backend and cached in the session as the
//! panel state; the verify toggle mutates that cached state optimistically
//! and rolls it back if the backend rejects the write. Error responses
//! carry the (reverted) list so the client can re-render without another
//! fetch.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use fashion_reels_core::UserId;

use crate::error::{AdminError, Result};
use crate::middleware::AdminContext;
use crate::models::session_keys;
use crate::panel::{self, PanelState};
use crate::state::AppState;

/// Load the cached panel state, refetching from the backend if absent.
async fn load_panel(
    state: &AppState,
    session: &Session,
    admin: &AdminContext,
) -> Result<PanelState> {
    if let Some(panel) = session.get::<PanelState>(session_keys::PANEL).await? {
        return Ok(panel);
    }
    let users = state.users().list_users(&admin.token).await?;
    Ok(PanelState::new(users))
}

/// Persist the panel state.
async fn save_panel(session: &Session, panel: &PanelState) -> Result<()> {
    session.insert(session_keys::PANEL, panel).await?;
    Ok(())
}

/// List all registered users.
///
/// Always refetches so the panel starts from backend truth, then caches
/// the list as the state the toggle mutates.
#[instrument(skip(state, session, admin))]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    admin: AdminContext,
) -> Result<Json<PanelState>> {
    let users = state.users().list_users(&admin.token).await?;
    let panel = PanelState::new(users);
    save_panel(&session, &panel).await?;
    Ok(Json(panel))
}

/// Body of the verify toggle.
#[derive(Debug, Deserialize)]
pub struct VerifyToggle {
    pub verified: bool,
}

/// Optimistically toggle a user's verification flag.
///
/// On backend rejection the cached state is rolled back and the response
/// carries both the error and the reverted list; the toggle is never
/// retried automatically.
#[instrument(skip(state, session, admin, body))]
pub async fn toggle_verify(
    State(state): State<AppState>,
    session: Session,
    admin: AdminContext,
    Path(id): Path<UserId>,
    Json(body): Json<VerifyToggle>,
) -> Result<Response> {
    let mut panel = load_panel(&state, &session, &admin).await?;

    if panel.verified(&id).is_none() {
        return Err(AdminError::BadRequest(format!("unknown user {id}")));
    }

    let outcome = panel::toggle_verified(
        state.users(),
        &admin.token,
        &mut panel,
        &id,
        body.verified,
    )
    .await;

    // Whatever happened, the session reflects the panel's current truth:
    // flipped on success, reverted on failure.
    save_panel(&session, &panel).await?;

    match outcome {
        Ok(()) => Ok(Json(panel).into_response()),
        Err(err) => {
            tracing::warn!(user_id = %id, error = %err, "verify toggle rejected, rolled back");
            Ok((
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Failed to update verification status",
                    "users": panel.users,
                })),
            )
                .into_response())
        }
    }
}
