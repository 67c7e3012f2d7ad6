//! Bounded exponential backoff for rate-limited model calls.
//!
//! Only `LlmError::RateLimited` is retried. Every other failure is returned
//! on the attempt that produced it, without sleeping.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::LlmError;

const DEFAULT_MAX_RETRIES: u32 = 4;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt, so at most `max_retries + 1` calls are made.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles for every retry after that.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Delay slept before retry number `retry` (0-based): 5s, 10s, 20s, 40s with defaults.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }

    /// The full backoff schedule this policy would sleep through.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).map(|retry| self.delay_for(retry))
    }

    /// Runs `op` until it succeeds, fails with a non-rate-limit error, or the
    /// retry budget is spent. `op` receives the 0-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, LlmError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let mut attempt = 0;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_rate_limited() => return Err(err),
                Err(err) if attempt >= self.max_retries => {
                    return Err(LlmError::RetriesExhausted {
                        retries: self.max_retries,
                        last_error: err.to_string(),
                    });
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Model call rate limited on attempt {} ({}), retrying after {}ms",
                        attempt + 1,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
