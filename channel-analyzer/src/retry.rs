//! Bounded exponential backoff for transient YouTube API failures.

use crate::youtube_api::ApiError;
use std::future::Future;
use std::time::Duration;

/// How often, and how patiently, to retry a failed API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. `1` disables retries.
    pub max_attempts: u32,
    /// Delay before the second attempt. Doubles for every attempt after that.
    pub initial_backoff: Duration,
    /// Upper bound on the delay between two attempts.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// The delay to wait after the given (1-based) failed attempt.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or runs out of attempts.
    ///
    /// `what` names the operation in log output.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> eyre::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = eyre::Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(what, attempt, "succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < self.max_attempts && is_transient(&e) => {
                    let backoff = self.backoff_after(attempt);
                    tracing::warn!(
                        what,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "transient YouTube API failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an error is worth retrying.
///
/// That is the case for rate limiting and server errors reported by the API, and for requests
/// that never got a response because of a timeout or a failed connection.
pub fn is_transient(error: &eyre::Report) -> bool {
    error.chain().any(|cause| {
        if let Some(api_error) = cause.downcast_ref::<ApiError>() {
            api_error.is_transient()
        } else if let Some(http_error) = cause.downcast_ref::<reqwest::Error>() {
            http_error.is_timeout() || http_error.is_connect()
        } else {
            false
        }
    })
}
