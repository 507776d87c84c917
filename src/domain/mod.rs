//! Domain layer: session identity, push-channel contract, and the
//! session registry.
//!
//! This module contains the transport-agnostic core of the gateway: the
//! session model, the frame envelope, the [`PushChannel`] seam the
//! streaming transport implements, and the concurrent registry that maps
//! session identifiers to live channels.

pub mod channel;
pub mod session;
pub mod session_id;
pub mod session_registry;

pub use channel::{Frame, FrameType, PushChannel};
pub use session::Session;
pub use session_id::SessionId;
pub use session_registry::SessionRegistry;
