//! Wall-clock adapter for warband timestamps.

use chrono::{DateTime, Utc};

use crate::infrastructure::ports::ClockPort;

/// Stamps `createdAt`, `updatedAt` and `exportedAt` from the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_do_not_go_backwards() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
        // Sub-second precision survives the RFC 3339 form used on disk.
        let parsed: DateTime<Utc> = first.to_rfc3339().parse().expect("rfc3339");
        assert_eq!(parsed, first);
    }
}
