//! In-memory cart store for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use fashion_reels_core::Cart;

use super::{CartStore, CartStoreError};

/// Cart store holding its value in process memory.
///
/// Mirrors the storage contract of the session-backed store (full-value
/// replace, absent loads as empty) so checkout and cart logic can be
/// exercised without a session layer.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slot: Mutex<Option<Cart>>,
}

impl MemoryCartStore {
    /// A store pre-seeded with a cart.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            slot: Mutex::new(Some(cart)),
        }
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| CartStoreError(e.to_string()))?;
        Ok(slot.clone().unwrap_or_default())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CartStoreError(e.to_string()))?;
        *slot = Some(cart.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CartStoreError(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
