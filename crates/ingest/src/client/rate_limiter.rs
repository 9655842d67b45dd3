//! Minimum-interval rate limiter for one provider binding.
//!
//! Paces outbound calls so that no two requests to the same provider start
//! closer together than the configured interval. Each provider binding owns
//! one limiter; distinct providers never contend with each other.

use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::Mutex;

/// Paces callers to at least `min_interval` between completed calls.
///
/// The last-completion timestamp is held under an async mutex that stays
/// locked across the sleep, so concurrent callers queue in arrival order:
/// exactly one proceeds per interval tick, and no call is dropped or
/// coalesced.
pub struct RateLimiter {
    min_interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completed: Mutex::new(None),
        }
    }

    /// Suspend until at least `min_interval` has elapsed since the last
    /// completed call, then stamp completion and return.
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last_completed.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                debug!("Rate limiter: waiting {:?}", remaining);
                tokio::time::sleep(remaining).await;
            }
        }

        *last = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
