//! Concurrent session storage keyed by [`SessionId`].
//!
//! [`SessionRegistry`] maps live session identifiers to their push
//! channels. Entries are [`Weak`] references: the connection's
//! [`super::Session`] owns the channel, and a registry entry can never
//! keep a torn-down channel alive. All operations are pure map
//! operations; no channel I/O ever runs inside the lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use crate::domain::channel::PushChannel;
use crate::domain::SessionId;

/// Central lookup table for all live streaming sessions.
///
/// # Concurrency
///
/// Shared by every connection's lifecycle task and every inbound call.
/// The map is guarded by a [`std::sync::RwLock`]; critical sections are
/// pure insert/lookup/remove, so no operation blocks on I/O while
/// holding the lock and [`lookup`] never suspends.
///
/// [`lookup`]: SessionRegistry::lookup
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Weak<dyn PushChannel>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh session identifier and stores a lookup entry for
    /// `channel`.
    ///
    /// The returned identifier never collides with a currently-live one:
    /// the mint-and-insert runs under the write lock and re-rolls on the
    /// (practically impossible) UUID collision.
    pub fn register(&self, channel: &Arc<dyn PushChannel>) -> SessionId {
        let mut map = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        loop {
            let id = SessionId::new();
            if map.contains_key(&id) {
                continue;
            }
            map.insert(id, Arc::downgrade(channel));
            tracing::debug!(session_id = %id, live = map.len(), "session registered");
            return id;
        }
    }

    /// Resolves a session identifier to its push channel.
    ///
    /// Read-only and non-blocking. Returns `None` when the identifier was
    /// never registered, was deregistered, or its channel has already been
    /// torn down.
    #[must_use]
    pub fn lookup(&self, id: SessionId) -> Option<Arc<dyn PushChannel>> {
        let map = self
            .sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.get(&id).and_then(Weak::upgrade)
    }

    /// Removes the lookup entry for `id`.
    ///
    /// Idempotent: safe to call from the disconnect-detection path even if
    /// the entry is already gone. Returns `true` if an entry was removed.
    pub fn deregister(&self, id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            tracing::debug!(session_id = %id, "session deregistered");
        }
        removed
    }

    /// Closes every live channel and clears the registry.
    ///
    /// Part of the explicit shutdown path owned by the composition root.
    /// Channels are collected under the lock but closed outside it.
    pub fn shutdown(&self) {
        let channels: Vec<Arc<dyn PushChannel>> = {
            let mut map = self
                .sessions
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            map.drain().filter_map(|(_, weak)| weak.upgrade()).collect()
        };
        let count = channels.len();
        for channel in channels {
            channel.close();
        }
        tracing::info!(closed = count, "session registry shut down");
    }

    /// Returns the number of registry entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::channel::testing::RecordingChannel;

    fn make_channel() -> Arc<dyn PushChannel> {
        Arc::new(RecordingChannel::new())
    }

    #[test]
    fn register_and_lookup() {
        let registry = SessionRegistry::new();
        let channel = make_channel();
        let id = registry.register(&channel);

        assert!(registry.lookup(id).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_unknown_returns_none() {
        let registry = SessionRegistry::new();
        assert!(registry.lookup(SessionId::new()).is_none());
    }

    #[test]
    fn deregister_then_lookup_is_none() {
        let registry = SessionRegistry::new();
        let channel = make_channel();
        let id = registry.register(&channel);

        assert!(registry.deregister(id));
        assert!(registry.lookup(id).is_none());
    }

    #[test]
    fn deregister_twice_is_harmless() {
        let registry = SessionRegistry::new();
        let channel_a = make_channel();
        let channel_b = make_channel();
        let a = registry.register(&channel_a);
        let b = registry.register(&channel_b);

        assert!(registry.deregister(a));
        assert!(!registry.deregister(a));
        // Unrelated sessions are unaffected.
        assert!(registry.lookup(b).is_some());
    }

    #[test]
    fn dropped_channel_is_not_resolvable() {
        let registry = SessionRegistry::new();
        let channel = make_channel();
        let id = registry.register(&channel);

        drop(channel);
        assert!(registry.lookup(id).is_none());
    }

    #[test]
    fn shutdown_closes_all_live_channels() {
        let registry = SessionRegistry::new();
        let a = make_channel();
        let b = make_channel();
        let _ = registry.register(&a);
        let _ = registry.register(&b);

        registry.shutdown();
        assert!(a.is_closed());
        assert!(b.is_closed());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn concurrent_registers_yield_distinct_ids() {
        let registry = Arc::new(SessionRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..64 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let channel = make_channel();
                let id = registry.register(&channel);
                // Keep the channel alive until the id is reported.
                (id, channel)
            }));
        }

        let mut ids = std::collections::HashSet::new();
        let mut channels = Vec::new();
        for handle in handles {
            let Ok((id, channel)) = handle.await else {
                panic!("register task panicked");
            };
            ids.insert(id);
            channels.push(channel);
        }
        assert_eq!(ids.len(), 64);
        assert_eq!(registry.len(), 64);
    }
}
