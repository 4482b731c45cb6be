//! HTTP routes
//!
//! | Route                          | Handler                  |
//! |--------------------------------|--------------------------|
//! | `GET  /api/health`             | [`health::health`]       |
//! | `GET  /api/config`             | [`health::client_config`]|
//! | `POST /api/verify-qr`          | [`verify::verify_qr`]    |
//! | `POST /api/verify-nfc`         | [`verify::verify_nfc`]   |
//! | `POST /api/admin/generate-qr`  | [`admin::generate_qr`]   |
//! | `GET  /api/admin/audit-logs`   | [`admin::audit_logs`]    |
//! | `GET  /api/admin/stats`        | [`admin::stats`]         |
//! | `GET  /api/stats`              | [`admin::stats`]         |

pub mod admin;
pub mod health;
pub mod verify;

use crate::error::{ApiError, REDACTED_ERROR};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Route table advertised by the health endpoint
pub const ENDPOINTS: [(&str, &str); 6] = [
    ("POST /api/verify-qr", "Verify QR codes"),
    ("POST /api/verify-nfc", "Verify NFC tags"),
    ("POST /api/admin/generate-qr", "Generate new QR codes"),
    ("GET /api/admin/audit-logs", "View audit logs"),
    ("GET /api/admin/stats", "System statistics"),
    ("GET /api/config", "Client configuration"),
];

/// Build the application router
pub fn router(state: AppState) -> Router {
    with_middleware(api_routes(), state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/config", get(health::client_config))
        .route("/api/verify-qr", post(verify::verify_qr))
        .route("/api/verify-nfc", post(verify::verify_nfc))
        .route("/api/admin/generate-qr", post(admin::generate_qr))
        .route("/api/admin/audit-logs", get(admin::audit_logs))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/stats", get(admin::stats))
}

/// Attach the 404 fallback, request tracing and panic recovery to `routes`
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let expose = state.expose_errors();

    routes
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(
                    move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, expose),
                )),
        )
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// 500 response for a handler panic; the panic text is shown only when `expose` is set
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, expose: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let body = json!({
        "success": false,
        "message": "Internal server error",
        "error": if expose { detail } else { REDACTED_ERROR.to_string() },
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_message_redacted_in_production() {
        let response = panic_response(Box::new("registry exploded"), false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], REDACTED_ERROR);
    }

    #[tokio::test]
    async fn test_panic_message_shown_in_development() {
        let response = panic_response(Box::new(String::from("registry exploded")), true);
        let body = body_json(response).await;
        assert_eq!(body["error"], "registry exploded");
    }
}
