//! Shared state for axum handlers

use crate::config::ServerConfig;
use chrono::{DateTime, Utc};
use securetag_core::TagService;
use std::sync::Arc;

/// Shared server state, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Verification service
    pub service: Arc<TagService>,
    /// Effective configuration
    pub config: Arc<ServerConfig>,
    /// When the server started, for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Bundle the service and config; `started_at` anchors uptime
    pub fn new(service: Arc<TagService>, config: ServerConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            service,
            config: Arc::new(config),
            started_at,
        }
    }

    /// Whether internal error details may be returned to clients
    pub fn expose_errors(&self) -> bool {
        self.config.environment.is_development()
    }
}
