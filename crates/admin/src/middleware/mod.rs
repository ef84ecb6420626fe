//! Request middleware: sessions and admin identity.

pub mod auth;
pub mod session;

pub use auth::AdminContext;
pub use session::create_session_layer;
