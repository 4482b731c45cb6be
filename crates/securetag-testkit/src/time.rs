//! Controllable clock for deterministic testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use securetag_core::PhysicalTimeEffects;
use std::sync::Arc;

/// Instant every fixture starts at: 2026-10-16T09:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ControllableTimeSource {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl ControllableTimeSource {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Create a clock frozen at [`fixed_now`]
    pub fn fixed() -> Self {
        Self::new(fixed_now())
    }

    /// Move the clock forward (or backward, for negative durations)
    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }

    /// Jump to an absolute time
    pub fn set(&self, to: DateTime<Utc>) {
        *self.current.lock() = to;
    }

    /// Current time without going through the effect trait
    pub fn current(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

impl Default for ControllableTimeSource {
    fn default() -> Self {
        Self::fixed()
    }
}

#[async_trait]
impl PhysicalTimeEffects for ControllableTimeSource {
    async fn now(&self) -> DateTime<Utc> {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clock_is_frozen_until_advanced() {
        let clock = ControllableTimeSource::fixed();
        assert_eq!(clock.now().await, fixed_now());
        assert_eq!(clock.now().await, fixed_now());

        let shared = clock.clone();
        shared.advance(Duration::hours(25));
        assert_eq!(clock.now().await, fixed_now() + Duration::hours(25));
    }
}
