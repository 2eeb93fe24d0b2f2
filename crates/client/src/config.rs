//! Client configuration.

use std::time::Duration;

use crate::retry::RetryConfig;

/// Default engine URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Engine origin; routes are appended under `/api`
    pub base_url: String,
    pub request_timeout: Duration,
    pub retry: RetryConfig,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    /// Quiet period before a cost request is sent
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            cache_capacity: 100,
            cache_ttl: Duration::from_secs(5),
            debounce: Duration::from_millis(100),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Uses `WARBAND_API_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var("WARBAND_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url.trim()),
            _ => Self::default(),
        }
    }
}
