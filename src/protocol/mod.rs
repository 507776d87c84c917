//! Protocol layer: call envelope, session routing, and the
//! exactly-once dispatcher.

pub mod dispatcher;
pub mod messages;
pub mod router;

pub use dispatcher::Dispatcher;
pub use messages::{CallAccepted, CallRequest, Operation};
pub use router::CallRouter;
