use std::future::Future;
use std::time::Duration;

use crate::error::{HostingError, Result};

/// Interval between two retries.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Bounded retry with a fixed delay between attempts.
///
/// Total attempts never exceed `max_retries + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, interval: Duration) -> Self {
        Self {
            max_retries,
            interval,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            interval: RETRY_INTERVAL,
        }
    }
}

/// Run `operation` until it succeeds or the retry budget is consumed.
///
/// Attempts are strictly sequential. A recoverable failure prints a
/// diagnostic with the failure message and attempt count to stderr, then
/// waits exactly `policy.interval` before the next attempt. Once the
/// counter exceeds `policy.max_retries` the dispatcher fails with
/// [`HostingError::RetryExhausted`]. Any non-recoverable error propagates
/// immediately without retry.
///
/// The dispatcher does not deduplicate or roll back the operation's side
/// effects; callers must make the operation safe to repeat (e.g. upload
/// with the override flag).
pub async fn retry<T, F, Fut>(policy: RetryPolicy, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_diagnostics(policy, operation, |error, attempt| {
        eprintln!("ERROR: {error}. Retry {attempt}.");
    })
    .await
}

/// Like [`retry`], but routes each per-retry diagnostic through
/// `diagnostic` instead of stderr.
///
/// The callback fires once per retried failure, never for the failure
/// that exhausts the budget and never for a fatal error.
pub async fn retry_with_diagnostics<T, F, Fut, D>(
    policy: RetryPolicy,
    mut operation: F,
    mut diagnostic: D,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    D: FnMut(&HostingError, u32),
{
    let mut attempts: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_recoverable() => {
                attempts += 1;
                if attempts > policy.max_retries {
                    return Err(HostingError::RetryExhausted {
                        max_retries: policy.max_retries,
                    });
                }
                diagnostic(&error, attempts);
                tokio::time::sleep(policy.interval).await;
            }
            Err(error) => return Err(error),
        }
    }
}
