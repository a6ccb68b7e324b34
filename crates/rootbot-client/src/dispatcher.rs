//! Fans out unclaimed inbound frames to device subscribers.

use std::collections::HashMap;

use log::debug;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use rootbot_protocol::Frame;

/// Broadcast registry of telemetry subscribers, keyed by device id.
///
/// Frames reach the dispatcher only after the correlator declined them;
/// every live subscriber of the frame's device receives a copy, in
/// subscription order. Subscribers filter by command themselves, since a
/// device may emit several distinct event codes.
#[derive(Debug, Default)]
pub struct TelemetryDispatcher {
    subscribers: Mutex<HashMap<u8, Vec<mpsc::UnboundedSender<Frame>>>>,
}

impl TelemetryDispatcher {
    /// Create an empty registry.
    pub fn new() -> Self {
        TelemetryDispatcher::default()
    }

    /// Subscribe to all unclaimed frames from one device.
    pub fn subscribe(&self, device: u8) -> mpsc::UnboundedReceiver<Frame> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().entry(device).or_default().push(tx);
        rx
    }

    /// Deliver a frame to every live subscriber of its device, pruning
    /// subscribers whose receiver has been dropped.
    pub fn dispatch(&self, frame: Frame) {
        let mut subscribers = self.subscribers.lock();
        match subscribers.get_mut(&frame.device) {
            Some(list) => {
                list.retain(|tx| tx.send(frame).is_ok());
            }
            None => {
                debug!(
                    "no subscriber for device {} command {}",
                    frame.device, frame.command
                );
            }
        }
    }

    /// Number of live subscribers for a device.
    pub fn subscriber_count(&self, device: u8) -> usize {
        self.subscribers
            .lock()
            .get(&device)
            .map_or(0, |list| list.len())
    }
}
