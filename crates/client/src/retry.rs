//! Retry policy with exponential backoff.
//!
//! `decide` is the single place that classifies a failure. Client errors
//! (4xx) are final except 408 and 429; server errors and network failures
//! are retried; timeouts get fewer attempts with a longer base delay.

use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt)
    pub max_retries: u32,
    /// Base delay in milliseconds before first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays
    pub jitter_factor: f64,
    /// Retry budget when the failure is a timeout
    pub timeout_max_retries: u32,
    /// Base delay in milliseconds after a timeout
    pub timeout_base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            jitter_factor: 0.2,
            timeout_max_retries: 1,
            timeout_base_delay_ms: 2_000,
        }
    }
}

impl RetryConfig {
    /// A single attempt, never retried.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            timeout_max_retries: 0,
            ..Self::default()
        }
    }
}

/// Failure class as seen by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Status(u16),
    Network,
    Timeout,
    Decode,
    Config,
}

impl FailureKind {
    pub fn of(error: &ClientError) -> Self {
        match error {
            ClientError::Status { status, .. } => Self::Status(*status),
            ClientError::Network(_) => Self::Network,
            ClientError::Timeout(_) => Self::Timeout,
            ClientError::Decode(_) => Self::Decode,
            ClientError::Config(_) => Self::Config,
            ClientError::RetriesExhausted { last, .. } => Self::of(last),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { delay: Duration },
    /// Retryable, but the budget is spent.
    Exhausted,
    /// Not worth retrying.
    Fail,
}

/// Decide what to do after `attempt` (1-based) failed with `failure`.
pub fn decide(config: &RetryConfig, failure: FailureKind, attempt: u32) -> RetryDecision {
    let (budget, base_delay_ms) = match failure {
        FailureKind::Status(408 | 429) => (config.max_retries, config.base_delay_ms),
        FailureKind::Status(status) if (400..500).contains(&status) => return RetryDecision::Fail,
        FailureKind::Status(status) if status >= 500 => (config.max_retries, config.base_delay_ms),
        FailureKind::Status(_) | FailureKind::Decode | FailureKind::Config => {
            return RetryDecision::Fail
        }
        FailureKind::Network => (config.max_retries, config.base_delay_ms),
        FailureKind::Timeout => (config.timeout_max_retries, config.timeout_base_delay_ms),
    };

    if attempt > budget {
        return RetryDecision::Exhausted;
    }
    RetryDecision::Retry {
        delay: Duration::from_millis(backoff_delay(
            base_delay_ms,
            config.max_delay_ms,
            config.jitter_factor,
            attempt,
        )),
    }
}

/// `base * 2^(attempt-1)`, capped at `max`, then jittered by ±`jitter_factor`.
pub fn backoff_delay(base_ms: u64, max_ms: u64, jitter_factor: f64, attempt: u32) -> u64 {
    let exponential = base_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
    let capped = exponential.min(max_ms);

    let jitter_range = (capped as f64 * jitter_factor) as i64;
    if jitter_range > 0 {
        let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
        (capped as i64 + jitter).max(0) as u64
    } else {
        capped
    }
}

/// Run `operation` under `config`, sleeping between attempts.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 1;
    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(
                        attempt,
                        operation = operation_name,
                        "Request succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        match decide(config, FailureKind::of(&error), attempt) {
            RetryDecision::Retry { delay } => {
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    operation = operation_name,
                    "Request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            RetryDecision::Exhausted if attempt > 1 => {
                tracing::error!(
                    attempts = attempt,
                    error = %error,
                    operation = operation_name,
                    "Request failed after all retry attempts"
                );
                return Err(ClientError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }
            RetryDecision::Exhausted | RetryDecision::Fail => return Err(error),
        }
    }
}
