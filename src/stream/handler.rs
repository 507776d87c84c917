//! SSE streaming endpoint.
//!
//! `GET <stream_path>` opens the long-lived push channel for one client:
//! allocates a session, emits the `session` preamble frame announcing the
//! assigned identifier and call endpoint, then streams frames until
//! either side disconnects. Teardown deregisters the session and closes
//! the channel.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures_util::stream;
use futures_util::Stream;
use tokio::sync::mpsc;

use super::sse_channel::SseChannel;
use crate::app_state::AppState;
use crate::domain::{Frame, PushChannel, Session, SessionRegistry};
use crate::error::GatewayError;

/// Deregisters the session when the response stream is dropped.
///
/// Axum drops the body stream on peer disconnect (or server shutdown),
/// which drops this guard: the registry entry goes away and the owned
/// [`Session`] closes its channel. In-flight dispatches then observe
/// `ChannelClosed` and degrade silently.
struct StreamGuard {
    registry: Arc<SessionRegistry>,
    session: Session,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.registry.deregister(self.session.id());
        tracing::info!(session_id = %self.session.id(), "streaming session closed");
    }
}

/// `GET <stream_path>` — Open a streaming session.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if the preamble frame cannot be
/// written (the queue is freshly created, so this indicates a bug rather
/// than peer behavior).
pub async fn stream_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let (channel, rx) = SseChannel::open(state.channel_capacity);
    let channel: Arc<dyn PushChannel> = channel;

    let session_id = state.registry.register(&channel);
    let session = Session::new(session_id, Arc::clone(&channel));

    let endpoint = format!("{}?session_id={}", state.call_path, session_id);
    if channel.send(Frame::session(session_id, endpoint)).await.is_err() {
        state.registry.deregister(session_id);
        return Err(GatewayError::Internal(
            "failed to write session preamble".to_string(),
        ));
    }

    tracing::info!(%session_id, "streaming session opened");

    let guard = StreamGuard {
        registry: Arc::clone(&state.registry),
        session,
    };
    Ok(Sse::new(frame_stream(rx, guard)).keep_alive(KeepAlive::default()))
}

/// Adapts the frame queue into an SSE event stream.
///
/// The guard travels inside the stream state so that it is dropped
/// exactly when axum drops the response body.
fn frame_stream(
    rx: mpsc::Receiver<Frame>,
    guard: StreamGuard,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let frame = rx.recv().await?;
        let data = serde_json::to_string(&frame).unwrap_or_default();
        let event = Event::default()
            .event(frame.frame_type.as_event_name())
            .data(data);
        Some((Ok(event), (rx, guard)))
    })
}
