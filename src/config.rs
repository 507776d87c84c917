//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The streaming and call endpoint paths
//! are configuration constants, not protocol-significant values.

use std::net::SocketAddr;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Path of the SSE streaming endpoint.
    pub stream_path: String,

    /// Path of the out-of-band call endpoint.
    pub call_path: String,

    /// Whether the shared-secret header check is enforced.
    pub auth_required: bool,

    /// Shared secret expected in the `x-api-key` header.
    ///
    /// When [`Self::auth_required`] is `true` and this is `None`, the
    /// gateway fails closed with a server error on every guarded endpoint.
    pub auth_token: Option<String>,

    /// Capacity of each session's outbound frame queue.
    pub channel_capacity: usize,

    /// Timeout in seconds for outbound collaborator HTTP requests.
    pub upstream_timeout_secs: u64,

    /// Base URL of the geocoding API.
    pub geocoding_url: String,

    /// Base URL of the weather forecast API.
    pub forecast_url: String,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let stream_path =
            std::env::var("STREAM_PATH").unwrap_or_else(|_| "/stream".to_string());
        let call_path =
            std::env::var("CALL_PATH").unwrap_or_else(|_| "/messages".to_string());

        let auth_required = parse_env_bool("AUTH_REQUIRED", false);
        let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());

        let channel_capacity = parse_env("CHANNEL_CAPACITY", 64);
        let upstream_timeout_secs = parse_env("UPSTREAM_TIMEOUT_SECS", 15);

        let geocoding_url = std::env::var("GEOCODING_URL")
            .unwrap_or_else(|_| "https://geocoding-api.open-meteo.com/v1/search".to_string());
        let forecast_url = std::env::var("FORECAST_URL")
            .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string());

        Ok(Self {
            listen_addr,
            stream_path,
            call_path,
            auth_required,
            auth_token,
            channel_capacity,
            upstream_timeout_secs,
            geocoding_url,
            forecast_url,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
