//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::auth::AuthSettings;
use crate::domain::SessionRegistry;
use crate::protocol::CallRouter;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Constructed once by the composition root in `main`; the registry is
/// deliberately reachable here so shutdown can close all live channels.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session registry shared by the stream and call endpoints.
    pub registry: Arc<SessionRegistry>,
    /// Router resolving inbound calls to session channels.
    pub call_router: Arc<CallRouter>,
    /// Shared-secret policy for the guarded endpoints.
    pub auth: AuthSettings,
    /// Call endpoint path, advertised in every session preamble frame.
    pub call_path: String,
    /// Outbound frame queue capacity per session.
    pub channel_capacity: usize,
}
