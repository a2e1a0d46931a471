//! Retry with exponential backoff, factored out of the HTTP calls so the
//! policy is testable on its own.

use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy for a single provider call.
///
/// The wait before attempt `n + 1` is `base_delay * 2^n` (1-based), so the
/// default one-second base yields 2 s and 4 s waits across three attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget runs out. Exhaustion wraps the last retryable error.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt >= policy.max_attempts => {
                return Err(ProviderError::RetriesExhausted {
                    attempts: policy.max_attempts,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    "provider call failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt,
                    policy.max_attempts,
                    delay,
                    err
                );
                sleep(delay).await;
            }
        }
    }
}
