//! HTTP error responses
//!
//! Unknown and expired tags are not errors; they are ordinary 200 responses
//! with `verified: false`. The variants here cover rejected input, unknown
//! routes and genuine faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use securetag_core::SecureTagError;
use serde_json::json;
use thiserror::Error;

/// Message shown instead of internal details outside development
pub const REDACTED_ERROR: &str = "Something went wrong";

/// Errors returned by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A verification request without a usable tag identifier
    #[error("invalid verification request: {description}")]
    InvalidTagRequest {
        /// Explanation returned to the client
        description: String,
    },

    /// An admin request that failed validation
    #[error("validation failed: {message}")]
    Validation {
        /// Explanation returned to the client
        message: String,
    },

    /// No route matched
    #[error("endpoint not found")]
    NotFound,

    /// Unexpected failure
    #[error("internal error: {message}")]
    Internal {
        /// Underlying error text
        message: String,
        /// Whether `message` may be shown to the client
        expose: bool,
    },
}

impl ApiError {
    /// Map a domain error raised while verifying a tag
    pub fn from_verify(err: SecureTagError, expose: bool) -> Self {
        match err {
            SecureTagError::Invalid { message } => Self::InvalidTagRequest {
                description: message,
            },
            other => Self::internal(other, expose),
        }
    }

    /// Map a domain error raised by an admin operation
    pub fn from_admin(err: SecureTagError, expose: bool) -> Self {
        match err {
            SecureTagError::Invalid { message } => Self::Validation { message },
            other => Self::internal(other, expose),
        }
    }

    /// Internal error carrying `err`'s text
    pub fn internal(err: impl std::fmt::Display, expose: bool) -> Self {
        Self::Internal {
            message: err.to_string(),
            expose,
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// - Invalid verification request / validation: 400 Bad Request
    /// - Unknown route: 404 Not Found
    /// - Internal: 500 Internal Server Error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTagRequest { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidTagRequest { description } => json!({
                "verified": false,
                "message": "Invalid request",
                "description": description,
            }),
            Self::Validation { message } => json!({
                "success": false,
                "message": message,
            }),
            Self::NotFound => json!({
                "success": false,
                "message": "Endpoint not found",
            }),
            Self::Internal { message, expose } => {
                tracing::error!(error = %message, "Request failed");
                json!({
                    "success": false,
                    "message": "Internal server error",
                    "error": if expose { message } else { REDACTED_ERROR.to_string() },
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
