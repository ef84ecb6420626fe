//! Session-backed cart store.

use async_trait::async_trait;
use tower_sessions::Session;

use fashion_reels_core::Cart;

use super::{CartStore, CartStoreError};
use crate::models::session_keys;

/// Cart store backed by the shopper's durable session.
///
/// The whole cart serializes into the single [`session_keys::CART`] slot.
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    /// Wrap a request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CartStore for SessionCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        // A value that fails to deserialize (e.g. written by an older
        // build) loads as an empty cart rather than an error.
        match self.session.get::<Cart>(session_keys::CART).await {
            Ok(Some(cart)) => Ok(cart),
            Ok(None) => Ok(Cart::new()),
            Err(err) => {
                tracing::warn!(error = %err, "malformed cart in session, starting empty");
                Ok(Cart::new())
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session
            .insert(session_keys::CART, cart)
            .await
            .map_err(Into::into)
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        self.session
            .remove::<Cart>(session_keys::CART)
            .await
            .map(|_| ())
            .or_else(|err| {
                // Removal of an unreadable value still clears the slot.
                tracing::warn!(error = %err, "clearing malformed cart value");
                Ok(())
            })
    }
}
