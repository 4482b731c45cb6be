//! Admin endpoints: tag issuing, audit log, statistics

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use securetag_core::{
    AuditEntry, AuditEventKind, AuditFilter, IssueRequest, OutcomeFilter, SystemStats, TagRecord,
    DEFAULT_QUERY_LIMIT,
};
use serde::{Deserialize, Serialize};

/// `POST /api/admin/generate-qr` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Always `true`; failures use [`ApiError`]
    pub success: bool,
    /// Identifier to encode in the QR image
    pub qr_code: String,
    /// Stored record
    pub data: TagRecord,
    /// Human-readable confirmation
    pub message: &'static str,
}

/// Mint a new QR tag
pub async fn generate_qr(
    State(state): State<AppState>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::Validation {
        message: format!("Invalid request body: {}", rejection.body_text()),
    })?;

    let record = state
        .service
        .issue(&request)
        .await
        .map_err(|err| ApiError::from_admin(err, state.expose_errors()))?;

    Ok(Json(GenerateResponse {
        success: true,
        qr_code: record.id.clone(),
        data: record,
        message: "QR code generated successfully",
    }))
}

/// `GET /api/admin/audit-logs` query string
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogParams {
    /// Page size, default 50
    pub limit: Option<usize>,
    /// `QR_VERIFICATION` or `NFC_VERIFICATION`
    #[serde(rename = "type")]
    pub event: Option<AuditEventKind>,
    /// `verified` or `failed`
    pub outcome: Option<OutcomeFilter>,
}

/// `GET /api/admin/audit-logs` response
#[derive(Debug, Serialize)]
pub struct AuditLogsResponse {
    /// Always `true`
    pub success: bool,
    /// Most-recent-first entries
    pub logs: Vec<AuditEntry>,
    /// Entries retained in the log, ignoring filters
    pub total: usize,
}

/// Page through the audit log
pub async fn audit_logs(
    State(state): State<AppState>,
    params: Result<Query<AuditLogParams>, QueryRejection>,
) -> Result<Json<AuditLogsResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::Validation {
        message: format!("Invalid query: {}", rejection.body_text()),
    })?;

    let filter = AuditFilter {
        event: params.event,
        outcome: params.outcome,
    };
    let page = state
        .service
        .audit_logs(&filter, params.limit.unwrap_or(DEFAULT_QUERY_LIMIT));

    Ok(Json(AuditLogsResponse {
        success: true,
        logs: page.logs,
        total: page.total,
    }))
}

/// `GET /api/admin/stats` response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Always `true`
    pub success: bool,
    /// Registry and audit totals
    pub stats: SystemStats,
}

/// Registry totals and recent verification counts
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state
        .service
        .stats()
        .await
        .map_err(|err| ApiError::from_admin(err, state.expose_errors()))?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
