//! meteo-gateway server entry point.
//!
//! Starts the Axum HTTP server with the streaming, call, and system
//! endpoints, and owns the shutdown path that closes all live sessions.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use meteo_gateway::api;
use meteo_gateway::api::auth::AuthSettings;
use meteo_gateway::app_state::AppState;
use meteo_gateway::config::GatewayConfig;
use meteo_gateway::domain::SessionRegistry;
use meteo_gateway::protocol::{CallRouter, Dispatcher};
use meteo_gateway::weather::OpenMeteoProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting meteo-gateway");

    // Build domain layer
    let registry = Arc::new(SessionRegistry::new());

    // Build protocol layer over the Open-Meteo collaborator
    let provider = Arc::new(OpenMeteoProvider::new(&config)?);
    let dispatcher = Arc::new(Dispatcher::new(provider));
    let call_router = Arc::new(CallRouter::new(Arc::clone(&registry), dispatcher));

    // Build application state
    let app_state = AppState {
        registry: Arc::clone(&registry),
        call_router,
        auth: AuthSettings::from_config(&config),
        call_path: config.call_path.clone(),
        channel_capacity: config.channel_capacity,
    };

    // Build router
    let app = api::build_router(&config, app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit teardown: every live stream gets its channel closed.
    registry.shutdown();

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
