//! Time source for roster timestamps.

use chrono::{DateTime, Utc};

/// Injected so use cases stamp records deterministically under test.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    /// Current instant, used for `createdAt`, `updatedAt` and `exportedAt`.
    fn now(&self) -> DateTime<Utc>;
}
