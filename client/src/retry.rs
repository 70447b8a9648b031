//! Bounded exponential backoff for order submission
//!
//! Up to three attempts per call; server-side (5xx) and transport failures
//! wait `2^attempt` seconds between attempts, client errors (4xx) stop
//! immediately. No jitter, no cancellation.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AppResult;

pub const MAX_ATTEMPTS: u32 = 3;
pub const BASE_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: Duration::from_millis(BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following `attempt` (zero-based): 1s, 2s, 4s...
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Run `operation` until it succeeds, fails fatally, or exhausts the
    /// attempt limit; the last observed error is returned on exhaustion.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> AppResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < self.max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying after server-side failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
