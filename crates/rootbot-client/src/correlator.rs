//! Matches inbound frames to pending request futures.

use std::collections::HashMap;

use log::warn;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use rootbot_protocol::{Frame, PAYLOAD_SIZE};

/// Correlation key for one outstanding request.
///
/// Matching is by exact triple, not FIFO order, so requests to different
/// devices may be in flight simultaneously without interfering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    /// Target device id.
    pub device: u8,
    /// Command code.
    pub command: u8,
    /// Sequence id of the request frame.
    pub sequence: u8,
}

impl RequestKey {
    /// The key a frame would match.
    pub fn of(frame: &Frame) -> Self {
        RequestKey {
            device: frame.device,
            command: frame.command,
            sequence: frame.sequence,
        }
    }
}

/// Table of pending requests, each resolved at most once.
#[derive(Debug, Default)]
pub struct ResponseCorrelator {
    pending: Mutex<HashMap<RequestKey, oneshot::Sender<[u8; PAYLOAD_SIZE]>>>,
}

impl ResponseCorrelator {
    /// Create an empty table.
    pub fn new() -> Self {
        ResponseCorrelator::default()
    }

    /// Register a matcher for `key` and return the waiter half.
    ///
    /// With 256+ requests in flight the wrapping sequence counter can
    /// reuse a live key; the stale waiter is dropped (it observes a
    /// closed channel) so the table never holds two entries per key.
    pub fn register(&self, key: RequestKey) -> oneshot::Receiver<[u8; PAYLOAD_SIZE]> {
        let (tx, rx) = oneshot::channel();
        if self.pending.lock().insert(key, tx).is_some() {
            warn!(
                "sequence id collision on {:?}; dropping the stale waiter",
                key
            );
        }
        rx
    }

    /// Remove a matcher that will never be resolved (timeout or send
    /// failure), so abandoned entries do not leak.
    pub fn remove(&self, key: RequestKey) {
        self.pending.lock().remove(&key);
    }

    /// Offer an inbound frame to the table.
    ///
    /// On a match, exactly one waiter is resolved with the frame payload
    /// and removed; no other entry is touched, and `None` is returned.
    /// Otherwise the frame is handed back for telemetry dispatch — a
    /// frame is either a response or telemetry, never both.
    pub fn offer(&self, frame: Frame) -> Option<Frame> {
        match self.pending.lock().remove(&RequestKey::of(&frame)) {
            Some(waiter) => {
                // The waiter may have timed out between removal and here;
                // a failed send just drops the payload.
                let _ = waiter.send(frame.payload);
                None
            }
            None => Some(frame),
        }
    }

    /// Number of requests currently awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(device: u8, command: u8, sequence: u8) -> Frame {
        Frame {
            device,
            command,
            sequence,
            payload: [7u8; PAYLOAD_SIZE],
        }
    }

    #[tokio::test]
    async fn test_exact_match_resolves_one_waiter() {
        let correlator = ResponseCorrelator::new();
        let key = RequestKey { device: 1, command: 8, sequence: 3 };
        let rx = correlator.register(key);

        assert!(correlator.offer(frame(1, 8, 3)).is_none());
        assert_eq!(rx.await.unwrap(), [7u8; PAYLOAD_SIZE]);
        assert_eq!(correlator.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_mismatched_sequence_is_returned() {
        let correlator = ResponseCorrelator::new();
        let _rx = correlator.register(RequestKey { device: 1, command: 8, sequence: 3 });

        // Same device and command, different id: not ours.
        assert!(correlator.offer(frame(1, 8, 4)).is_some());
        assert_eq!(correlator.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_unrelated_waiters_untouched() {
        let correlator = ResponseCorrelator::new();
        let rx_motors = correlator.register(RequestKey { device: 1, command: 8, sequence: 0 });
        let rx_sound = correlator.register(RequestKey { device: 5, command: 0, sequence: 1 });

        assert!(correlator.offer(frame(5, 0, 1)).is_none());
        assert_eq!(rx_sound.await.unwrap(), [7u8; PAYLOAD_SIZE]);

        // The motors waiter is still pending.
        assert_eq!(correlator.pending_count(), 1);
        drop(rx_motors);
    }

    #[tokio::test]
    async fn test_colliding_key_drops_stale_waiter() {
        let correlator = ResponseCorrelator::new();
        let key = RequestKey { device: 1, command: 8, sequence: 3 };
        let stale = correlator.register(key);
        let fresh = correlator.register(key);

        assert_eq!(correlator.pending_count(), 1);
        assert!(stale.await.is_err());

        assert!(correlator.offer(frame(1, 8, 3)).is_none());
        assert!(fresh.await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_clears_entry() {
        let correlator = ResponseCorrelator::new();
        let key = RequestKey { device: 14, command: 1, sequence: 9 };
        let _rx = correlator.register(key);
        correlator.remove(key);
        assert_eq!(correlator.pending_count(), 0);
        assert!(correlator.offer(frame(14, 1, 9)).is_some());
    }
}
