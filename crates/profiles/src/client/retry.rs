//! Bounded retry of transient failures with a fixed delay.

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::ProfilesError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Retry configuration for one logical request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying.
    pub max_retries: u32,
    /// Fixed pause before each retry.
    pub delay: Duration,
}

impl RetryConfig {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Single attempt, no retry.
    pub fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

/// Retry bookkeeping owned by exactly one call to [`with_retry`].
#[derive(Debug)]
struct RetryState {
    remaining: u32,
    attempts: u32,
}

/// Terminal failure of a retried operation.
#[derive(Debug)]
pub(crate) struct Exhausted {
    pub error: ProfilesError,
    pub attempts: u32,
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent.
///
/// Attempts are strictly sequential: the next one starts only after the
/// previous result was classified and the delay elapsed.
pub(crate) async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut attempt: F,
) -> Result<(T, u32), Exhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProfilesError>>,
{
    let mut state = RetryState {
        remaining: config.max_retries,
        attempts: 0,
    };

    loop {
        state.attempts += 1;

        match attempt().await {
            Ok(value) => return Ok((value, state.attempts)),
            Err(error) if error.retry_class().is_retryable() && state.remaining > 0 => {
                state.remaining -= 1;
                warn!(
                    "Retrying {} ({}/{}): {}",
                    label,
                    config.max_retries - state.remaining,
                    config.max_retries,
                    error
                );
                if !config.delay.is_zero() {
                    tokio::time::sleep(config.delay).await;
                }
            }
            Err(error) => {
                return Err(Exhausted {
                    error,
                    attempts: state.attempts,
                })
            }
        }
    }
}
