//! Retry policy for rate-limited search requests.
//!
//! Wraps a single outbound call with bounded retry-on-rate-limit semantics.
//! Only HTTP 429 responses are retried; rate limits are transient and
//! self-correcting, while timeouts and server errors are not assumed to be,
//! so those propagate on first occurrence.

use std::future::Future;
use std::time::Duration;
use tracing::instrument;

use crate::errors::{SearchError, SearchResult};

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum total fetch attempts (initial call included).
    pub max_attempts: u32,
    /// Base delay for exponential backoff.
    pub backoff_base: Duration,
    /// Upper bound on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Creates a new retry configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum total attempts.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the backoff base delay.
    pub fn backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Sets the maximum backoff delay.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

/// Retry policy: bounded retries against 429 responses, honoring the
/// server's `retry-after` hint when present, exponential backoff otherwise.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Creates a new retry policy.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Creates a retry policy with default configuration.
    pub fn default_policy() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Executes an operation, retrying rate-limit failures.
    ///
    /// Exhausting the attempt budget against repeated 429s yields
    /// [`SearchError::MaxRetriesExceeded`]; any non-retryable error
    /// propagates immediately.
    #[instrument(skip(self, operation), fields(max_attempts = self.config.max_attempts))]
    pub async fn execute<F, Fut, T>(&self, operation: F) -> SearchResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SearchResult<T>>,
    {
        let mut attempt: u32 = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    attempt += 1;

                    if !err.is_retryable() {
                        return Err(err);
                    }

                    if attempt >= self.config.max_attempts {
                        return Err(SearchError::MaxRetriesExceeded { attempts: attempt });
                    }

                    let delay = self.backoff_delay(attempt - 1, &err);

                    tracing::info!(
                        attempt,
                        max_attempts = self.config.max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "Rate limited, retrying after delay"
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Computes the delay before the next attempt.
    ///
    /// The server-supplied `retry-after` hint wins over the exponential
    /// default of `base * 2^attempt_index` (2s, 4s, 8s), capped at
    /// `max_delay`.
    fn backoff_delay(&self, attempt_index: u32, error: &SearchError) -> Duration {
        if let Some(retry_after) = error.retry_after() {
            return retry_after;
        }

        let factor = 2u32.saturating_pow(attempt_index);
        self.config
            .backoff_base
            .saturating_mul(factor)
            .min(self.config.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}
