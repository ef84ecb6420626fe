//! Bounded retry with a fixed delay.
//!
//! Retries happen only where a policy explicitly asks for them; the single
//! consumer today is order lookup, which retries the read-after-write
//! `NotFound` window after payment confirmation. The combinator takes a
//! predicate so the policy never retries errors it was not built for.

use std::time::Duration;

use rand::Rng;

/// Retry policy: attempt bound, inter-attempt delay, optional jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of attempts (1 = no retry).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
    /// Upper bound of uniform random jitter added to each delay.
    pub jitter: Option<Duration>,
}

impl RetryPolicy {
    /// A policy with the given bound and delay, no jitter.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            jitter: None,
        }
    }

    /// The order-lookup policy: 3 attempts, 2 seconds apart.
    #[must_use]
    pub const fn order_lookup() -> Self {
        Self::new(3, Duration::from_secs(2))
    }

    /// Add uniform random jitter of up to `jitter` to each delay.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// The delay to sleep before the next attempt.
    fn next_delay(&self) -> Duration {
        match self.jitter {
            Some(jitter) if !jitter.is_zero() => {
                let extra_ms = rand::rng().random_range(0..=jitter.as_millis() as u64);
                self.delay + Duration::from_millis(extra_ms)
            }
            _ => self.delay,
        }
    }
}

/// Run `op` until it succeeds, the policy's attempt bound is reached, or it
/// fails with an error the predicate does not mark retryable.
///
/// The last error is returned unchanged, so callers keep their taxonomy.
///
/// # Errors
///
/// Returns the final error once attempts are exhausted, or the first
/// non-retryable error immediately.
pub async fn retry<T, E, Fut>(
    policy: RetryPolicy,
    is_retryable: impl Fn(&E) -> bool,
    mut op: impl FnMut() -> Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts || !is_retryable(&err) {
                    return Err(err);
                }
                tracing::debug!(attempt, max_attempts = policy.max_attempts, "retrying");
                tokio::time::sleep(policy.next_delay()).await;
                attempt += 1;
            }
        }
    }
}
