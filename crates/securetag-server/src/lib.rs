//! # SecureTag Server
//!
//! HTTP JSON API over [`securetag_core::TagService`]: QR and NFC
//! verification, admin issuing, audit log paging and statistics.
//!
//! The binary in `main.rs` parses flags, loads [`ServerConfig`], calls
//! [`build_service`] and serves [`router`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Layered configuration
pub mod config;

/// HTTP error responses
pub mod error;

/// Tracing subscriber setup
pub mod logging;

/// Route handlers
pub mod routes;

/// Shared handler state
pub mod state;

pub use config::{ConfigError, Environment, ServerConfig};
pub use error::ApiError;
pub use routes::{router, with_middleware};
pub use state::AppState;

use securetag_core::{demo_records, Result, TagService};
use securetag_effects::{MemoryRegistryHandler, RealRandomHandler, RealTimeHandler};
use std::sync::Arc;
use tracing::info;

/// Build the production service and register startup records
pub async fn build_service(config: &ServerConfig) -> Result<Arc<TagService>> {
    let service = TagService::new(
        Arc::new(MemoryRegistryHandler::new()),
        Arc::new(RealTimeHandler::new()),
        Arc::new(RealRandomHandler::new()),
        config.audit_capacity,
    )
    .with_issue_policy(config.issue_policy());

    let mut seeded = 0;
    if config.seed_demo_records {
        seeded += service.seed(demo_records()).await?;
    }
    seeded += service.seed(config.records.iter().cloned()).await?;
    info!(seeded, "Registry ready");

    Ok(Arc::new(service))
}
