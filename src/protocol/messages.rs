//! Inbound call envelope and operation names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SessionId;

/// One inbound call posted to the call endpoint.
///
/// The session it targets travels as a query parameter, not in the body;
/// the router resolves it before the dispatcher ever sees the call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallRequest {
    /// Optional client-assigned correlation id, echoed on the terminal
    /// frame. Server-generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Operation name (`search_location` or `get_complete_forecast`).
    ///
    /// Kept as a string so unknown names reach the dispatcher and come
    /// back as protocol error frames rather than transport failures.
    pub operation: String,
    /// Operation-specific arguments.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// The two externally callable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Geocoding search by city name.
    SearchLocation,
    /// Current conditions + 12-hour + 7-day forecast by coordinates.
    GetCompleteForecast,
}

impl Operation {
    /// Resolves an operation name, or `None` for unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "search_location" => Some(Self::SearchLocation),
            "get_complete_forecast" => Some(Self::GetCompleteForecast),
            _ => None,
        }
    }
}

/// Acknowledgment body returned by the call endpoint.
///
/// Acceptance and the eventual result frame are independent signals: a
/// `202` only means the call reached the dispatcher of the session's
/// channel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallAccepted {
    /// Always `"accepted"`.
    pub status: String,
    /// The session whose stream will carry the terminal frame.
    #[schema(value_type = String)]
    pub session_id: SessionId,
}

impl CallAccepted {
    /// Builds the acknowledgment for `session_id`.
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            status: "accepted".to_string(),
            session_id,
        }
    }
}
