//! Request middleware: sessions and shopper identity.

pub mod auth;
pub mod session;

pub use auth::CurrentShopper;
pub use session::create_session_layer;
