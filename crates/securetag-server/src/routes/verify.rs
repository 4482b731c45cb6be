//! QR and NFC verification endpoints

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::Json;
use chrono::{DateTime, Utc};
use securetag_core::verify::missing_identifier;
use securetag_core::{SecureTagError, TagKind, TagRecord, VerificationResult, Verdict};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::debug;

/// `POST /api/verify-qr` body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQrRequest {
    /// Scanned QR payload
    pub qr_code: Option<String>,
}

/// `POST /api/verify-nfc` body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyNfcRequest {
    /// Tag UID
    pub tag_id: Option<String>,
    /// Raw NDEF data read from the tag; accepted but not interpreted
    pub tag_data: Option<serde_json::Value>,
}

/// Record echo for verified tags
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedData {
    /// Stored record, unchanged
    #[serde(flatten)]
    pub record: TagRecord,
    /// When the check ran
    pub verified_at: DateTime<Utc>,
}

/// Verification response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Whether the tag was accepted
    pub verified: bool,
    /// Short verdict
    pub message: String,
    /// Explanation for rejected tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Echo of the presented QR payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    /// Echo of the presented NFC UID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    /// Expiry of an expired tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
    /// Stored record for accepted tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VerifiedData>,
}

impl From<VerificationResult> for VerifyResponse {
    fn from(result: VerificationResult) -> Self {
        let verified = result.verified();
        let message = result.message();
        let description = result.description();
        let expired_at = result.expired_at();
        let (qr_code, tag_id) = match result.kind {
            TagKind::Qr => (Some(result.identifier.clone()), None),
            TagKind::Nfc => (None, Some(result.identifier.clone())),
        };
        let verified_at = result.checked_at;
        let data = match result.verdict {
            Verdict::Verified { record } => Some(VerifiedData {
                record,
                verified_at,
            }),
            _ => None,
        };

        Self {
            verified,
            message,
            description,
            qr_code,
            tag_id,
            expired_at,
            data,
        }
    }
}

fn body_error(kind: TagKind, rejection: &JsonRejection) -> ApiError {
    debug!(kind = %kind, rejection = %rejection.body_text(), "Rejected verification body");
    ApiError::from_verify(missing_identifier(kind), false)
}

async fn run_verification(
    state: &AppState,
    kind: TagKind,
    identifier: Option<&str>,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let ip = peer.map(|ConnectInfo(addr)| addr.ip());
    state
        .service
        .verify(kind, identifier, ip)
        .await
        .map(|result| Json(result.into()))
        .map_err(|err: SecureTagError| ApiError::from_verify(err, state.expose_errors()))
}

/// Verify a scanned QR code
pub async fn verify_qr(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<VerifyQrRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| body_error(TagKind::Qr, &rejection))?;
    run_verification(&state, TagKind::Qr, request.qr_code.as_deref(), peer).await
}

/// Verify an NFC tag UID
pub async fn verify_nfc(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<VerifyNfcRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| body_error(TagKind::Nfc, &rejection))?;
    if let Some(tag_data) = &request.tag_data {
        debug!(tag_id = ?request.tag_id, %tag_data, "NFC tag data received");
    }
    run_verification(&state, TagKind::Nfc, request.tag_id.as_deref(), peer).await
}
