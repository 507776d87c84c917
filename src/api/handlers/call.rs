//! Out-of-band call endpoint.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::protocol::{CallAccepted, CallRequest};

/// Query parameters of the call endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CallParams {
    /// Target session identifier minted by the streaming endpoint.
    pub session_id: Option<String>,
}

/// `POST <call_path>?session_id=…` — Submit a call for a streaming session.
///
/// Returns `202 Accepted` once the call has been handed to the session's
/// dispatcher; the terminal `result`/`error` frame arrives asynchronously
/// on the matching stream.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidSession`] for an absent or malformed
/// `session_id` and [`GatewayError::SessionNotFound`] when no live
/// session exists under it.
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Calls",
    summary = "Submit a call",
    description = "Accepts `{id?, operation, arguments}` for the session named by the \
                   `session_id` query parameter. The result is delivered asynchronously \
                   as a frame on that session's stream.",
    params(
        ("session_id" = Option<String>, Query, description = "Target session identifier"),
    ),
    request_body = CallRequest,
    responses(
        (status = 202, description = "Call accepted for dispatch", body = CallAccepted),
        (status = 400, description = "Missing or malformed session reference", body = ErrorResponse),
        (status = 404, description = "No live session under this identifier", body = ErrorResponse),
    )
)]
pub async fn call_handler(
    State(state): State<AppState>,
    Query(params): Query<CallParams>,
    Json(call): Json<CallRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let session_id = state.call_router.route(params.session_id.as_deref(), call)?;
    Ok((StatusCode::ACCEPTED, Json(CallAccepted::new(session_id))))
}
