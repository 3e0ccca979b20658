// Retry logic with exponential backoff
// Author: kelexine (https://github.com/kelexine)

use crate::config::RetryConfig;
use crate::error::{Result, TranslateError};
use backoff::{backoff::Backoff, ExponentialBackoff};
use std::time::Duration;
use tracing::debug;

/// Attempt count and first delay; the delay doubles after every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

/// Create exponential backoff configuration for retries
pub fn create_backoff(policy: &RetryPolicy) -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: policy.base_delay,
        initial_interval: policy.base_delay,
        randomization_factor: 0.0,
        multiplier: 2.0,
        max_interval: Duration::from_secs(60),
        max_elapsed_time: None,
        ..Default::default()
    }
}

/// Determine if an error is worth another attempt.
///
/// Transport and upstream failures are; a result that came back empty or
/// echoed, or a bad request, will not change on retry.
pub fn is_retryable(error: &TranslateError) -> bool {
    matches!(error, TranslateError::Provider(_) | TranslateError::Http(_))
}

/// Execute operation, retrying retryable failures with exponential backoff
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut backoff = create_backoff(policy);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if !is_retryable(&e) || attempt >= policy.max_attempts {
                    return Err(e);
                }

                let delay = backoff.next_backoff().unwrap_or(policy.base_delay);
                debug!(
                    "{} failed (attempt {}): {}, retrying after {}ms",
                    operation_name,
                    attempt,
                    e,
                    delay.as_millis()
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}
