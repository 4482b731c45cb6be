//! Time effect handler - production only
//!
//! Stateless implementation of `PhysicalTimeEffects` delegating to the system
//! clock. Controllable clocks for tests live in `securetag-testkit`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use securetag_core::PhysicalTimeEffects;

/// Real time handler for production use
#[derive(Debug, Clone, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    #[allow(clippy::disallowed_methods)]
    async fn now(&self) -> DateTime<Utc> {
        // Utc::now() is allowed in production handlers that implement effect traits.
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clock_moves_forward() {
        let handler = RealTimeHandler::new();
        let first = handler.now().await;
        let second = handler.now().await;
        assert!(second >= first);
    }
}
