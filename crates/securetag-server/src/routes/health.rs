//! Health check and client configuration

use crate::config::Environment;
use crate::routes::ENDPOINTS;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use securetag_core::{DEMO_INVALID_CODES, DEMO_VERIFIED_CODES};
use serde::Serialize;
use std::collections::BTreeMap;

/// Demo QR codes for manual testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCodes {
    /// Codes that verify
    pub verified: Vec<String>,
    /// Codes that fail
    pub invalid: Vec<String>,
}

impl TestCodes {
    fn demo() -> Self {
        Self {
            verified: DEMO_VERIFIED_CODES.iter().map(|c| c.to_string()).collect(),
            invalid: DEMO_INVALID_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn test_codes(state: &AppState) -> Option<TestCodes> {
    (state.config.expose_test_codes && state.config.seed_demo_records).then(TestCodes::demo)
}

/// `GET /api/health` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers
    pub status: &'static str,
    /// Server time
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime: f64,
    /// Service version
    pub version: String,
    /// Route descriptions
    pub endpoints: BTreeMap<&'static str, &'static str>,
    /// Demo codes, when advertised
    #[serde(rename = "testQRCodes", skip_serializing_if = "Option::is_none")]
    pub test_qr_codes: Option<TestCodes>,
}

/// Liveness and version information
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = state.service.now().await;
    let uptime = (now - state.started_at).num_milliseconds().max(0) as f64 / 1000.0;

    Json(HealthResponse {
        status: "healthy",
        timestamp: now,
        uptime,
        version: state.config.version.clone(),
        endpoints: ENDPOINTS.into_iter().collect(),
        test_qr_codes: test_codes(&state),
    })
}

/// `GET /api/config` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Application name
    pub app_name: String,
    /// Service version
    pub version: String,
    /// Base URL for API calls
    pub api_base_url: String,
    /// Deployment environment
    pub environment: Environment,
    /// Demo codes, when advertised
    #[serde(rename = "testQRCodes", skip_serializing_if = "Option::is_none")]
    pub test_qr_codes: Option<TestCodes>,
}

/// Settings for browser clients
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        app_name: state.config.app_name.clone(),
        version: state.config.version.clone(),
        api_base_url: state.config.public_api_base_url(),
        environment: state.config.environment,
        test_qr_codes: test_codes(&state),
    })
}
