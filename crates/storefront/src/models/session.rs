//! Session-related types.
//!
//! The session is the storefront's durable per-shopper key-value storage:
//! the cart lives under a single key, and identity material issued by the
//! (external) auth flow lives under separate keys.

use serde::{Deserialize, Serialize};

use fashion_reels_core::UserId;

/// Session-stored shopper identity.
///
/// Assembled from the individual session keys; the storefront never issues
/// this material itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentShopper {
    /// Backend user id, required for checkout.
    pub user_id: UserId,
    /// Display name, if the auth flow provided one.
    pub name: Option<String>,
    /// Role string; "admin" unlocks the admin panel link.
    pub role: Option<String>,
}

/// Session keys for persisted state.
pub mod session_keys {
    /// Key holding the serialized cart sequence.
    pub const CART: &str = "cart";

    /// Key for the backend auth token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the backend user id.
    pub const USER_ID: &str = "user_id";

    /// Key for the user's role string.
    pub const USER_ROLE: &str = "user_role";

    /// Key for the user's display name.
    pub const USER_NAME: &str = "user_name";

    /// Key for the in-flight checkout phase.
    pub const CHECKOUT: &str = "checkout";

    /// Key for the reel playback visibility tracker.
    pub const REEL_PLAYBACK: &str = "reel_playback";
}
