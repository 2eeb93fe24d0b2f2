//! Client side of the warband builder: a typed REST client with retry,
//! an LRU/TTL cache for live pricing and a debounced cost recompute.

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod retry;

pub use api::{ApiClient, CachedCostApi, CostApi};
pub use cache::LruTtlCache;
pub use config::ClientConfig;
pub use debounce::{CostState, DebouncedCost};
pub use error::ClientError;
pub use retry::{with_retry, RetryConfig};
