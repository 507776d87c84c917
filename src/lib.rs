//! # meteo-gateway
//!
//! Session-multiplexed SSE gateway exposing two remote-callable weather
//! operations: location search and complete forecast retrieval.
//!
//! Each client opens one long-lived streaming connection and receives a
//! unique session identifier; calls are posted out-of-band against that
//! identifier and their results are pushed back over the matching stream.
//! The weather and geocoding lookups themselves are thin collaborators
//! behind a trait — this service is a correlation layer.
//!
//! ## Architecture
//!
//! ```text
//! Clients (SSE stream + HTTP calls)
//!     │
//!     ├── Stream endpoint (stream/)
//!     ├── Call + system endpoints (api/)
//!     │
//!     ├── CallRouter / Dispatcher (protocol/)
//!     │
//!     ├── SessionRegistry (domain/)
//!     │
//!     └── ForecastProvider → Open-Meteo (weather/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod stream;
pub mod weather;
