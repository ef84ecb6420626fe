//! The persistent cart store.
//!
//! [`CartStore`] is the injected seam between cart logic and whatever holds
//! the bytes: production uses the session store, tests use memory. Every
//! save is a full-value replace with last-writer-wins semantics - two
//! sessions racing on the same slot silently overwrite each other. That is
//! a documented limitation of the storage contract, not something this
//! layer papers over.

mod memory;
mod session;

pub use memory::MemoryCartStore;
pub use session::SessionCartStore;

use async_trait::async_trait;
use thiserror::Error;

use fashion_reels_core::Cart;

/// Error talking to the underlying cart storage.
#[derive(Debug, Error)]
#[error("cart store error: {0}")]
pub struct CartStoreError(pub String);

impl From<tower_sessions::session::Error> for CartStoreError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self(err.to_string())
    }
}

/// Durable storage slot for one shopper's cart.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load the cart; an absent or malformed value loads as an empty cart.
    async fn load(&self) -> Result<Cart, CartStoreError>;

    /// Overwrite the entire persisted value. No merge, last-writer-wins.
    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;

    /// Remove the persisted value outright.
    async fn clear(&self) -> Result<(), CartStoreError>;
}

/// Apply a mutation to the stored cart and return the saved result.
///
/// The sequence is always compute-new-sequence, save, then reload from the
/// store, so the value handed back is exactly what was persisted - there is
/// no separate in-memory copy to drift.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub async fn mutate<S: CartStore + ?Sized>(
    store: &S,
    apply: impl FnOnce(&mut Cart),
) -> Result<Cart, CartStoreError> {
    let mut cart = store.load().await?;
    apply(&mut cart);
    store.save(&cart).await?;
    store.load().await
}
