//! Streaming transport layer: the SSE push channel and its endpoint.
//!
//! The streaming endpoint delivers server-to-client frames for the life
//! of one session; all client-to-server traffic arrives out-of-band on
//! the call endpoint and is correlated back here by session id.

pub mod handler;
pub mod sse_channel;

pub use sse_channel::SseChannel;
