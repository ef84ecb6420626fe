//! Last-requested-wins guard for overlapping fetches.
//!
//! Every fetch takes a ticket from a monotonic sequence; when the response
//! arrives, it is accepted only if its ticket is still the newest issued.
//! A fast category/size switch therefore cannot have an older, slower
//! response overwrite a newer one (last-requested-wins, not
//! last-resolved-wins).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic fetch sequence.
#[derive(Debug, Clone, Default)]
pub struct LatestOnly {
    seq: Arc<AtomicU64>,
}

/// A ticket tagging one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    /// The sequence number carried by this ticket.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }
}

impl LatestOnly {
    /// Create a fresh sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new fetch, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the ticket is still the newest issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket.0
    }
}
