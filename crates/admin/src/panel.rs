//! Optimistic user panel state.
//!
//! The verify toggle flips the cached state first and talks to the backend
//! second. The flip is a pure reducer over `(state, action)`; before
//! applying, the executor captures the compensating action, and dispatches
//! it if the backend rejects the write. That keeps the rollback logic a
//! plain function call, testable without any HTTP at all - the executor
//! just wires it to the client. There is no automatic retry.

use serde::{Deserialize, Serialize};

use fashion_reels_core::UserId;

use crate::backend::{UserRecord, UsersClient, UsersError};

/// Cached panel state: the user list as the admin currently sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub users: Vec<UserRecord>,
}

/// An action over the panel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelAction {
    /// Set one user's verification flag.
    SetVerified { user_id: UserId, verified: bool },
}

impl PanelState {
    /// A panel over a freshly fetched user list.
    #[must_use]
    pub const fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// The verification flag of a user, if the panel knows them.
    #[must_use]
    pub fn verified(&self, user_id: &UserId) -> Option<bool> {
        self.users
            .iter()
            .find(|user| &user.id == user_id)
            .map(|user| user.verified)
    }
}

/// Pure reducer: apply an action to the state.
pub fn apply(state: &mut PanelState, action: &PanelAction) {
    match action {
        PanelAction::SetVerified { user_id, verified } => {
            if let Some(user) = state.users.iter_mut().find(|user| &user.id == user_id) {
                user.verified = *verified;
            }
        }
    }
}

/// The action that undoes `action` against the current state.
///
/// Must be computed before `apply`, while the prior value is still
/// observable. Returns `None` for users the panel does not know.
#[must_use]
pub fn compensating(state: &PanelState, action: &PanelAction) -> Option<PanelAction> {
    match action {
        PanelAction::SetVerified { user_id, .. } => {
            state.verified(user_id).map(|prior| PanelAction::SetVerified {
                user_id: user_id.clone(),
                verified: prior,
            })
        }
    }
}

/// Optimistically toggle a user's verification flag.
///
/// Flips the cached state immediately, fires the backend PUT, and on
/// rejection dispatches the compensating action and surfaces the error.
///
/// # Errors
///
/// Returns the backend error after rolling the state back; the state is
/// then exactly what it was before the call.
pub async fn toggle_verified(
    client: &UsersClient,
    token: &str,
    state: &mut PanelState,
    user_id: &UserId,
    verified: bool,
) -> Result<(), UsersError> {
    let action = PanelAction::SetVerified {
        user_id: user_id.clone(),
        verified,
    };
    let rollback = compensating(state, &action);

    apply(state, &action);

    match client.set_verified(token, user_id, verified).await {
        Ok(()) => Ok(()),
        Err(err) => {
            if let Some(rollback) = rollback {
                apply(state, &rollback);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn user(id: &str, verified: bool) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            verified,
        }
    }

    #[test]
    fn the_reducer_flips_exactly_one_user() {
        let mut state = PanelState::new(vec![user("u1", false), user("u2", false)]);
        apply(
            &mut state,
            &PanelAction::SetVerified {
                user_id: UserId::new("u1"),
                verified: true,
            },
        );
        assert_eq!(state.verified(&UserId::new("u1")), Some(true));
        assert_eq!(state.verified(&UserId::new("u2")), Some(false));
    }

    #[test]
    fn compensating_restores_the_prior_value() {
        let mut state = PanelState::new(vec![user("u1", false)]);
        let action = PanelAction::SetVerified {
            user_id: UserId::new("u1"),
            verified: true,
        };

        let rollback = compensating(&state, &action).unwrap();
        apply(&mut state, &action);
        apply(&mut state, &rollback);

        assert_eq!(state.verified(&UserId::new("u1")), Some(false));
    }

    #[test]
    fn unknown_users_have_no_compensating_action() {
        let state = PanelState::default();
        let action = PanelAction::SetVerified {
            user_id: UserId::new("ghost"),
            verified: true,
        };
        assert!(compensating(&state, &action).is_none());
    }

    #[tokio::test]
    async fn a_successful_toggle_keeps_the_optimistic_state() {
        let server = MockServer::start();
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/u1/verify")
                .json_body(json!({"verified": true}));
            then.status(200);
        });

        let client = UsersClient::new(&server.base_url());
        let mut state = PanelState::new(vec![user("u1", false)]);

        toggle_verified(&client, "admin-token", &mut state, &UserId::new("u1"), true)
            .await
            .unwrap();

        put.assert();
        assert_eq!(state.verified(&UserId::new("u1")), Some(true));
    }

    #[tokio::test]
    async fn a_rejected_toggle_rolls_back_and_does_not_retry() {
        let server = MockServer::start();
        let put = server.mock(|when, then| {
            when.method(PUT).path("/u1/verify");
            then.status(500).body("rejected");
        });

        let client = UsersClient::new(&server.base_url());
        let mut state = PanelState::new(vec![user("u1", false)]);

        let err =
            toggle_verified(&client, "admin-token", &mut state, &UserId::new("u1"), true)
                .await
                .unwrap_err();

        assert!(matches!(err, UsersError::Api { status: 500, .. }));
        assert_eq!(state.verified(&UserId::new("u1")), Some(false));
        assert_eq!(put.calls(), 1);
    }
}
