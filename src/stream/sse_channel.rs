//! SSE-backed push channel.
//!
//! [`SseChannel`] is the production [`PushChannel`]: frames are enqueued
//! whole onto a bounded [`mpsc`] queue whose receiver drives the HTTP
//! response body. Whole-frame enqueue is what serializes concurrent
//! `send` calls into a single total write order; a frame can never be
//! interleaved partially with another.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::channel::{Frame, PushChannel};
use crate::error::GatewayError;

/// Push channel streaming frames to one SSE client.
///
/// Created together with the [`mpsc::Receiver`] that the SSE response
/// body consumes. The channel transitions to CLOSED when [`close`] is
/// called or when the receiver side is dropped (peer disconnect); both
/// make every subsequent [`send`] fail with
/// [`GatewayError::ChannelClosed`].
///
/// [`close`]: PushChannel::close
/// [`send`]: PushChannel::send
#[derive(Debug)]
pub struct SseChannel {
    tx: Mutex<Option<mpsc::Sender<Frame>>>,
    closed: AtomicBool,
}

impl SseChannel {
    /// Opens a channel with the given outbound queue capacity.
    ///
    /// Returns the channel handle and the receiver that must drive the
    /// SSE response body.
    #[must_use]
    pub fn open(capacity: usize) -> (Arc<Self>, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let channel = Arc::new(Self {
            tx: Mutex::new(Some(tx)),
            closed: AtomicBool::new(false),
        });
        (channel, rx)
    }

    /// Clones the sender out of the slot, or `None` once closed.
    fn sender(&self) -> Option<mpsc::Sender<Frame>> {
        self.tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PushChannel for SseChannel {
    async fn send(&self, frame: Frame) -> Result<(), GatewayError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(GatewayError::ChannelClosed);
        }
        let Some(tx) = self.sender() else {
            return Err(GatewayError::ChannelClosed);
        };
        if tx.send(frame).await.is_err() {
            // Receiver gone: the peer disconnected between our check and
            // the enqueue. Latch the closed state.
            self.close();
            return Err(GatewayError::ChannelClosed);
        }
        Ok(())
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            // Dropping the sender terminates the receiver stream, which
            // ends the SSE response body.
            self.tx
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .take();
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn frame(tag: &str) -> Frame {
        Frame::result(tag.to_string(), serde_json::json!({ "tag": tag }))
    }

    #[tokio::test]
    async fn delivers_frames_in_send_order() {
        let (channel, mut rx) = SseChannel::open(16);
        for i in 0..5 {
            let sent = channel.send(frame(&format!("f{i}"))).await;
            assert!(sent.is_ok());
        }
        for i in 0..5 {
            let Some(received) = rx.recv().await else {
                panic!("queue ended early");
            };
            assert_eq!(received.id, format!("f{i}"));
        }
    }

    #[tokio::test]
    async fn send_after_close_fails() {
        let (channel, mut rx) = SseChannel::open(4);
        channel.close();
        assert!(channel.is_closed());

        let err = channel.send(frame("late")).await;
        assert!(matches!(err, Err(GatewayError::ChannelClosed)));
        // Close dropped the sender, so the receiver observes end-of-stream.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let (channel, _rx) = SseChannel::open(4);
        channel.close();
        channel.close();
        assert!(channel.is_closed());
    }

    #[tokio::test]
    async fn receiver_drop_latches_closed_on_next_send() {
        let (channel, rx) = SseChannel::open(4);
        drop(rx);

        let err = channel.send(frame("dropped")).await;
        assert!(matches!(err, Err(GatewayError::ChannelClosed)));
        assert!(channel.is_closed());
    }

    #[tokio::test]
    async fn concurrent_senders_preserve_per_task_order() {
        // Two tasks interleave 100 sends each; the captured sequence must
        // be a valid serialization preserving each task's internal order,
        // with every frame intact.
        let (channel, mut rx) = SseChannel::open(256);
        let a = {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move {
                for i in 0..100 {
                    let sent = channel.send(frame(&format!("a{i}"))).await;
                    assert!(sent.is_ok());
                }
            })
        };
        let b = {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move {
                for i in 0..100 {
                    let sent = channel.send(frame(&format!("b{i}"))).await;
                    assert!(sent.is_ok());
                }
            })
        };
        assert!(a.await.is_ok());
        assert!(b.await.is_ok());
        channel.close();

        let mut seen_a = Vec::new();
        let mut seen_b = Vec::new();
        while let Some(received) = rx.recv().await {
            if let Some(rest) = received.id.strip_prefix('a') {
                seen_a.push(rest.to_string());
            } else if let Some(rest) = received.id.strip_prefix('b') {
                seen_b.push(rest.to_string());
            } else {
                panic!("unexpected frame id {}", received.id);
            }
        }
        let expected: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        assert_eq!(seen_a, expected);
        assert_eq!(seen_b, expected);
    }
}
