//! One streaming session and its owned push channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::channel::PushChannel;
use crate::domain::SessionId;

/// One logical client connection and its assigned identifier.
///
/// A `Session` exists for exactly the life of one streaming connection.
/// It is the exclusive owner of its [`PushChannel`]; the registry only
/// holds a non-owning lookup entry. Dropping the session closes the
/// channel, so the registry entry can never outlive the channel it
/// points at.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    channel: Arc<dyn PushChannel>,
}

impl Session {
    /// Binds a freshly minted identifier to its channel.
    #[must_use]
    pub fn new(id: SessionId, channel: Arc<dyn PushChannel>) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            channel,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the session creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the owned push channel.
    #[must_use]
    pub fn channel(&self) -> &Arc<dyn PushChannel> {
        &self.channel
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.channel.close();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::channel::testing::RecordingChannel;

    #[test]
    fn drop_closes_the_channel() {
        let channel: Arc<dyn PushChannel> = Arc::new(RecordingChannel::new());
        let session = Session::new(SessionId::new(), Arc::clone(&channel));
        assert!(!channel.is_closed());
        drop(session);
        assert!(channel.is_closed());
    }

    #[test]
    fn accessors_expose_identity() {
        let channel: Arc<dyn PushChannel> = Arc::new(RecordingChannel::new());
        let id = SessionId::new();
        let session = Session::new(id, channel);
        assert_eq!(session.id(), id);
        assert!(session.created_at() <= Utc::now());
    }
}
