//! Wall-clock time effect.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `securetag-effects` (system clock), `securetag-testkit` (controllable clock)
//! - **Usage**: validity checks, audit timestamps, 24h statistics window, uptime
//!
//! Wall clock rather than monotonic: expiry and audit windows are calendar
//! concepts, so clock adjustments are visible to callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of the current wall-clock time
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current UTC time
    async fn now(&self) -> DateTime<Utc>;
}

/// Blanket implementation for Arc<T> where T: PhysicalTimeEffects
#[async_trait]
impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for std::sync::Arc<T> {
    async fn now(&self) -> DateTime<Utc> {
        (**self).now().await
    }
}
