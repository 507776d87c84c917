//! Inbound call routing by session identifier.
//!
//! The router owns no state beyond references to the registry and the
//! dispatcher. It resolves the target channel, hands the call to the
//! dispatcher on a separate task, and returns — acceptance of the
//! inbound request and delivery of the eventual result frame are two
//! independent signals.

use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::messages::CallRequest;
use crate::domain::{SessionId, SessionRegistry};
use crate::error::GatewayError;

/// Routes inbound calls to the push channel of their target session.
#[derive(Debug)]
pub struct CallRouter {
    registry: Arc<SessionRegistry>,
    dispatcher: Arc<Dispatcher>,
}

impl CallRouter {
    /// Creates a router over the given registry and dispatcher.
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Accepts one call for the session identified by `session_id`.
    ///
    /// Strict session-id matching: the call goes to the channel registered
    /// under exactly this identifier or nowhere. On success the dispatch
    /// task is spawned and the resolved id returned; the caller may
    /// acknowledge immediately.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidSession`] when `session_id` is absent or
    ///   malformed; the registry is not consulted.
    /// - [`GatewayError::SessionNotFound`] when no live session exists
    ///   under the identifier (expired, never existed, or already closed).
    pub fn route(
        &self,
        session_id: Option<&str>,
        call: CallRequest,
    ) -> Result<SessionId, GatewayError> {
        let raw = session_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GatewayError::InvalidSession("missing session_id query parameter".to_string())
            })?;
        let id: SessionId = raw.parse().map_err(|_| {
            GatewayError::InvalidSession(format!("malformed session id {raw:?}"))
        })?;

        let channel = self
            .registry
            .lookup(id)
            .ok_or(GatewayError::SessionNotFound(id))?;

        tracing::debug!(session_id = %id, operation = %call.operation, "call accepted");
        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::spawn(async move {
            dispatcher.dispatch(channel, call).await;
        });
        Ok(id)
    }
}
