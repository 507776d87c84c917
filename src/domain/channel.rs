//! Push-channel contract and outbound frame envelope.
//!
//! [`PushChannel`] is the transport-agnostic seam between the correlation
//! core and whatever carries bytes to the client. The production
//! implementation streams frames over SSE; tests use an in-memory
//! recording channel. Decoupling the core from the transport keeps the
//! registry, router, and dispatcher deterministic under unit test.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::SessionId;
use crate::error::GatewayError;

/// One server-to-client message on a push channel.
///
/// Frames form an ordered, append-only sequence per channel. Every frame
/// carries a correlation `id` (echoed from the inbound call where the
/// client supplied one) and a snake_case `type` discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Correlation id: client-provided for call responses, server-generated
    /// for the session preamble.
    pub id: String,
    /// Frame type discriminator.
    #[serde(rename = "type")]
    pub frame_type: FrameType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

/// Discriminator for push frame types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    /// First frame on every stream: announces the session id and call endpoint.
    Session,
    /// Successful terminal frame for one call.
    Result,
    /// Error terminal frame for one call.
    Error,
}

impl FrameType {
    /// SSE event name for this frame type.
    #[must_use]
    pub const fn as_event_name(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Result => "result",
            Self::Error => "error",
        }
    }
}

impl Frame {
    /// Builds the stream preamble frame announcing the session identity.
    ///
    /// `endpoint` is the ready-to-use call URL path including the
    /// `session_id` query parameter.
    #[must_use]
    pub fn session(session_id: SessionId, endpoint: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            frame_type: FrameType::Session,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "session_id": session_id,
                "endpoint": endpoint,
            }),
        }
    }

    /// Builds a successful terminal frame for the call with `call_id`.
    #[must_use]
    pub fn result(call_id: String, payload: serde_json::Value) -> Self {
        Self {
            id: call_id,
            frame_type: FrameType::Result,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error terminal frame for the call with `call_id`.
    #[must_use]
    pub fn error(call_id: String, code: u32, message: impl Into<String>) -> Self {
        Self {
            id: call_id,
            frame_type: FrameType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({
                "code": code,
                "message": message.into(),
            }),
        }
    }
}

/// Ordered push channel to one connected client.
///
/// State machine: `OPEN -> CLOSED` (terminal), triggered by [`close`],
/// by the peer disconnecting, or by an unrecoverable write error. No
/// reopening.
///
/// Implementations must serialize concurrent [`send`] calls into a single
/// total write order; a frame is either delivered whole or not at all.
///
/// [`close`]: PushChannel::close
/// [`send`]: PushChannel::send
#[async_trait]
pub trait PushChannel: std::fmt::Debug + Send + Sync {
    /// Appends one frame to the channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChannelClosed`] if invoked after the channel
    /// transitioned to CLOSED, including when the peer has disconnected.
    async fn send(&self, frame: Frame) -> Result<(), GatewayError>;

    /// Transitions the channel to CLOSED. Idempotent.
    ///
    /// Any in-flight `send` either completes or fails cleanly; no partial
    /// frame reaches the peer.
    fn close(&self);

    /// Returns `true` once the channel has transitioned to CLOSED.
    fn is_closed(&self) -> bool;
}
