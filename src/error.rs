//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Channel-level and collaborator-level failures never surface through HTTP
//! directly: they are converted into protocol frames (or dropped) at the
//! dispatcher boundary, but the variants live here so every layer shares one
//! taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SessionId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "session not found: 9f6c…",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status               |
/// |-----------|-------------------|---------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request           |
/// | 2000–2999 | Session state     | 404 Not Found             |
/// | 3000–3999 | Server / upstream | 500 / 502                 |
/// | 4000–4999 | Authentication    | 401 / 500                 |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The session reference on an inbound call is absent or malformed.
    #[error("invalid session reference: {0}")]
    InvalidSession(String),

    /// Request validation failed before a call was accepted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No live session exists for the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The push channel was closed before the frame could be written.
    ///
    /// Never surfaced to clients over HTTP; the dispatcher drops the frame
    /// and records the event in the diagnostic log.
    #[error("push channel closed")]
    ChannelClosed,

    /// The external weather/geocoding collaborator failed.
    ///
    /// Carries no upstream detail; the cause is only observable in the log.
    #[error("weather service unavailable")]
    Unavailable,

    /// The shared-secret header is missing or does not match.
    #[error("unauthorized")]
    Unauthorized,

    /// Authentication is required but no shared secret is configured.
    ///
    /// Fails closed: the gateway refuses traffic rather than admitting it
    /// unauthenticated.
    #[error("authentication misconfigured: no shared secret set")]
    AuthMisconfigured,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidSession(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::SessionNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::ChannelClosed => 3001,
            Self::Unavailable => 3002,
            Self::Unauthorized => 4001,
            Self::AuthMisconfigured => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSession(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::BAD_GATEWAY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ChannelClosed | Self::AuthMisconfigured | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
