//! Retry policy with capped exponential backoff.
//!
//! Both the source reader and the index writer wrap their remote calls in the
//! same policy; each caller decides which of its errors are transient.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);

/// Default ceiling for the delay between retries.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

/// Exponential backoff retrying transient failures until the operation succeeds.
///
/// The delay before retry `n` (zero-based) is `initial_delay * 2^n`, capped at
/// `max_delay`. Once the cap is reached every further retry waits `max_delay`.
/// There is no attempt limit: a transient failure is retried for as long as it
/// keeps happening, a non-transient one is returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
        }
    }

    /// Delay to wait before retry number `attempt` (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Run `operation` until it succeeds or fails with a non-transient error.
    ///
    /// Every transient failure is logged together with the delay chosen
    /// before the next attempt.
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, is_transient: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt: u32 = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if is_transient(&e) => {
                    let delay = self.delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
