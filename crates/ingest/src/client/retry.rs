//! Bounded retry with exponential backoff.
//!
//! Wraps one "attempt a call" future in a retry loop. Only failures
//! classified as transient ([`RetryClass::Backoff`]) are retried; permanent
//! failures and open circuits return immediately.

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::{FetchOutcome, RetryClass};

/// Retry policy: up to `max_attempts` attempts, doubling the delay from
/// `base_delay` between them.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Drive `attempt` until it succeeds, fails permanently, or the attempt
    /// budget is exhausted. Never panics; always resolves to a [`FetchOutcome`].
    pub async fn run<T, F, Fut>(&self, provider: &str, mut attempt: F) -> FetchOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FetchOutcome<T>>,
    {
        let mut delay = self.base_delay;
        let mut last_error = None;

        for attempt_number in 1..=self.max_attempts {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if error.retry_class() != RetryClass::Backoff
                        || attempt_number == self.max_attempts
                    {
                        return Err(error);
                    }

                    warn!(
                        "Attempt {}/{} against '{}' failed ({}), retrying in {:?}",
                        attempt_number, self.max_attempts, provider, error, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    last_error = Some(error);
                }
            }
        }

        // Unreachable: the loop always returns on the final attempt.
        Err(last_error.expect("retry loop exited without an outcome"))
    }
}
