//! Rate limiting for NCBI E-utilities compliance
//!
//! NCBI E-utilities rate limits:
//! - 3 requests per second without API key
//! - 10 requests per second with API key
//! - Violations can result in IP blocking
//!
//! The limiter hands out request slots spaced by a fixed interval. Slots are
//! reserved under a lock, so concurrent callers sharing one limiter are
//! serialized instead of racing for the same slot.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::{debug, instrument};

/// Requests per second allowed without an API key
pub const NCBI_DEFAULT_RATE: f64 = 3.0;

/// Requests per second allowed with an API key
pub const NCBI_API_KEY_RATE: f64 = 10.0;

/// Minimum-interval rate limiter
///
/// Clones share the same schedule, so every request issued through a client
/// (and its clones) is spaced correctly.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter allowing `rate` requests per second
    ///
    /// A non-positive or non-finite rate disables spacing entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use ncbi_gene_client::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let limiter = RateLimiter::new(4.0);
    /// assert_eq!(limiter.interval(), Duration::from_millis(250));
    /// ```
    pub fn new(rate: f64) -> Self {
        let interval = if rate.is_finite() && rate > 0.0 {
            Duration::from_secs_f64(1.0 / rate)
        } else {
            Duration::ZERO
        };
        Self::with_interval(interval)
    }

    /// Create a rate limiter with an explicit minimum spacing between requests
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Create rate limiter for NCBI API without API key (3 requests/second)
    pub fn ncbi_default() -> Self {
        Self::new(NCBI_DEFAULT_RATE)
    }

    /// Create rate limiter for NCBI API with API key (10 requests/second)
    pub fn ncbi_with_key() -> Self {
        Self::new(NCBI_API_KEY_RATE)
    }

    /// Pick the NCBI tier from whether an API key is configured
    pub fn for_api_key(has_api_key: bool) -> Self {
        if has_api_key {
            Self::ncbi_with_key()
        } else {
            Self::ncbi_default()
        }
    }

    /// Minimum spacing between two requests
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next request slot is available
    ///
    /// The first call returns immediately. Each later call is delayed until at
    /// least one interval has passed since the slot handed to the previous
    /// caller.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ncbi_gene_client::RateLimiter;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let limiter = RateLimiter::ncbi_default();
    ///
    ///     for i in 0..5 {
    ///         limiter.acquire().await;
    ///         println!("Making API call {}", i + 1);
    ///     }
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        let slot = self.reserve_slot();
        let now = Instant::now();

        if slot > now {
            debug!(
                wait_ms = (slot - now).as_millis() as u64,
                "Waiting for rate limit slot"
            );
            sleep_until(slot).await;
        } else {
            debug!("Rate limit slot available immediately");
        }
    }

    /// Reserve the next free slot and advance the schedule by one interval
    fn reserve_slot(&self) -> Instant {
        let mut next_slot = self
            .next_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let slot = match *next_slot {
            Some(next) if next > now => next,
            _ => now,
        };
        *next_slot = Some(slot + self.interval);
        slot
    }
}
