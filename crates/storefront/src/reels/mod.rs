//! The reel browser: listings, carousel position, add-to-cart.
//!
//! Listings come from the backend per (category, size) pair and are cached
//! for five minutes. Overlapping fetches are tagged with a monotonic
//! sequence number; a response that is no longer the latest issued is not
//! installed (see [`latest`]), which closes the stale-response race a fast
//! category/size switch would otherwise hit.

pub mod latest;
pub mod playback;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use fashion_reels_core::{CartLine, Category, LineItemId, Size};

use crate::backend::types::ReelItem;
use crate::backend::{BackendClient, BackendError};
use latest::LatestOnly;

/// Listing cache TTL.
const LISTING_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// A fetched listing plus the generation of the fetch that produced it.
///
/// The generation feeds the playback tracker, which resets whenever the
/// listing it observes changes.
#[derive(Debug, Clone)]
pub struct Listing {
    pub generation: u64,
    pub items: Vec<ReelItem>,
}

/// Reel listing service with caching and a last-requested-wins guard.
#[derive(Clone)]
pub struct ReelsService {
    backend: BackendClient,
    cache: Cache<String, Arc<Listing>>,
    latest: LatestOnly,
}

impl ReelsService {
    /// Create the service over a backend client.
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(LISTING_TTL)
            .build();

        Self {
            backend,
            cache,
            latest: LatestOnly::new(),
        }
    }

    /// Fetch the listing for a category+size pair.
    ///
    /// Served from cache when fresh. On a miss the fetch takes a sequence
    /// ticket; if a newer fetch was issued while this one was in flight,
    /// the response is handed to its own caller but not installed, so the
    /// cache always reflects the most recently requested listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend request fails.
    #[instrument(skip(self), fields(category = %category, size = %size))]
    pub async fn listing(
        &self,
        category: Category,
        size: &Size,
    ) -> Result<Arc<Listing>, BackendError> {
        let key = format!("{category}:{size}");

        if let Some(listing) = self.cache.get(&key).await {
            debug!("listing cache hit");
            return Ok(listing);
        }

        let ticket = self.latest.issue();
        let items = self.backend.list_reels(category, size).await?;
        let listing = Arc::new(Listing {
            generation: ticket.seq(),
            items,
        });

        if self.latest.is_current(ticket) {
            self.cache.insert(key, Arc::clone(&listing)).await;
        } else {
            debug!("discarding stale listing response");
            if let Some(current) = self.cache.get(&key).await {
                return Ok(current);
            }
        }

        Ok(listing)
    }
}

/// Wrapping carousel arithmetic over a non-empty listing.
pub mod carousel {
    /// Clamp an arbitrary index onto the listing, wrapping modulo length.
    #[must_use]
    pub const fn wrap(index: usize, len: usize) -> usize {
        index % len
    }

    /// The index after `index`, wrapping to the start.
    #[must_use]
    pub const fn next(index: usize, len: usize) -> usize {
        (index + 1) % len
    }

    /// The index before `index`, wrapping to the end.
    #[must_use]
    pub const fn previous(index: usize, len: usize) -> usize {
        (index + len - 1) % len
    }
}

/// Derive a cart line from the reel currently in view.
///
/// A fresh stable id is assigned here, at add-to-cart time; purchase
/// quantity always starts at 1.
#[must_use]
pub fn derive_cart_line(item: &ReelItem, category: Category, size: Size) -> CartLine {
    CartLine {
        id: LineItemId::random(),
        product: item.id.clone(),
        video_url: item.video_url.clone(),
        category,
        size,
        unit_price: item.price,
        quantity: 1,
    }
}
