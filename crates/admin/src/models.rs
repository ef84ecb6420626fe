//! Session keys for the admin panel.

/// Session keys for persisted admin state.
pub mod session_keys {
    /// Key for the backend auth token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the user's role string.
    pub const USER_ROLE: &str = "user_role";

    /// Key for the admin's display name.
    pub const USER_NAME: &str = "user_name";

    /// Key for the cached user panel state.
    pub const PANEL: &str = "user_panel";
}
