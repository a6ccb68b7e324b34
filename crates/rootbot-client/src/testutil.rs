//! In-memory byte channel and helpers for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::connection::ConnectionState;
use crate::link::RobotLink;
use crate::transport::{ByteChannel, ChannelError, InfoItem};
use rootbot_protocol::{Frame, FrameCodec, FRAME_SIZE, PAYLOAD_SIZE};

/// An in-memory [`ByteChannel`].
///
/// Sent frames are logged and forwarded to a takeable receiver so test
/// responders can wake on them; inbound frames are injected with
/// [`push_inbound`](Self::push_inbound). Identity reads answer from a
/// configurable table.
#[derive(Clone)]
pub(crate) struct MockChannel {
    inner: Arc<MockInner>,
}

struct MockInner {
    sent_log: Mutex<Vec<[u8; FRAME_SIZE]>>,
    sent_tx: mpsc::UnboundedSender<[u8; FRAME_SIZE]>,
    sent_rx: Mutex<Option<mpsc::UnboundedReceiver<[u8; FRAME_SIZE]>>>,
    inbound_tx: mpsc::UnboundedSender<[u8; FRAME_SIZE]>,
    inbound_rx: Mutex<Option<mpsc::UnboundedReceiver<[u8; FRAME_SIZE]>>>,
    info: Mutex<HashMap<InfoItem, Vec<u8>>>,
    fail_connect: AtomicBool,
    fail_info: AtomicBool,
}

impl MockChannel {
    pub(crate) fn new() -> Self {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let info = HashMap::from([
            (InfoItem::SerialNumber, b"RT0123456".to_vec()),
            (InfoItem::FirmwareVersion, b"1.4".to_vec()),
            (InfoItem::HardwareVersion, b"1.0".to_vec()),
            (InfoItem::Manufacturer, b"iRobot".to_vec()),
            (InfoItem::RobotState, vec![0x00, 100]),
        ]);
        MockChannel {
            inner: Arc::new(MockInner {
                sent_log: Mutex::new(Vec::new()),
                sent_tx,
                sent_rx: Mutex::new(Some(sent_rx)),
                inbound_tx,
                inbound_rx: Mutex::new(Some(inbound_rx)),
                info: Mutex::new(info),
                fail_connect: AtomicBool::new(false),
                fail_info: AtomicBool::new(false),
            }),
        }
    }

    /// Inject an inbound notification frame.
    pub(crate) fn push_inbound(&self, wire: [u8; FRAME_SIZE]) {
        let _ = self.inner.inbound_tx.send(wire);
    }

    /// Take the receiver of sent frames. Panics if taken twice.
    pub(crate) fn take_sent_receiver(&self) -> mpsc::UnboundedReceiver<[u8; FRAME_SIZE]> {
        self.inner
            .sent_rx
            .lock()
            .take()
            .expect("sent receiver already taken")
    }

    /// Number of frames sent so far.
    pub(crate) fn sent_count(&self) -> usize {
        self.inner.sent_log.lock().len()
    }

    /// The most recently sent frame.
    pub(crate) fn last_sent(&self) -> Option<[u8; FRAME_SIZE]> {
        self.inner.sent_log.lock().last().copied()
    }

    /// Override one identity value.
    #[allow(dead_code)]
    pub(crate) fn set_info(&self, item: InfoItem, value: Vec<u8>) {
        self.inner.info.lock().insert(item, value);
    }

    /// Make the transport connect fail.
    pub(crate) fn fail_connect(&self) {
        self.inner.fail_connect.store(true, Ordering::SeqCst);
    }

    /// Make identity reads fail.
    pub(crate) fn fail_info_reads(&self) {
        self.inner.fail_info.store(true, Ordering::SeqCst);
    }
}

impl ByteChannel for MockChannel {
    async fn connect(&self) -> Result<(), ChannelError> {
        if self.inner.fail_connect.load(Ordering::SeqCst) {
            return Err(ChannelError::Transport("injected connect failure".into()));
        }
        Ok(())
    }

    async fn discover_capabilities(&self) -> Result<(), ChannelError> {
        Ok(())
    }

    fn subscribe_frames(&self) -> Result<mpsc::UnboundedReceiver<[u8; FRAME_SIZE]>, ChannelError> {
        self.inner.inbound_rx.lock().take().ok_or(ChannelError::Closed)
    }

    async fn send_frame(&self, frame: [u8; FRAME_SIZE]) -> Result<(), ChannelError> {
        self.inner.sent_log.lock().push(frame);
        // The receiver may have been dropped; the log above still records
        // the frame.
        let _ = self.inner.sent_tx.send(frame);
        Ok(())
    }

    async fn read_info(&self, item: InfoItem) -> Result<Vec<u8>, ChannelError> {
        if self.inner.fail_info.load(Ordering::SeqCst) {
            return Err(ChannelError::Transport("injected read failure".into()));
        }
        self.inner
            .info
            .lock()
            .get(&item)
            .cloned()
            .ok_or(ChannelError::Closed)
    }
}

/// A link in the `Ready` state with a running inbound pump.
pub(crate) fn ready_link() -> (RobotLink<MockChannel>, MockChannel) {
    let mock = MockChannel::new();
    let link = RobotLink::new(mock.clone(), Duration::from_secs(2));
    link.set_state(ConnectionState::Ready);

    let mut frames = mock
        .subscribe_frames()
        .expect("fresh mock channel");
    let rx_link = link.clone();
    tokio::spawn(async move {
        while let Some(bytes) = frames.recv().await {
            rx_link.handle_inbound(&bytes);
        }
    });

    (link, mock)
}

/// Await the next sent frame and echo a response for it.
///
/// The response reuses the request's device, command and sequence id
/// (shifted by `sequence_delta`) and carries `payload`. Returns the sent
/// wire frame for assertions.
pub(crate) async fn respond_to_next(
    sent: &mut mpsc::UnboundedReceiver<[u8; FRAME_SIZE]>,
    mock: &MockChannel,
    sequence_delta: u8,
    payload: [u8; PAYLOAD_SIZE],
) -> [u8; FRAME_SIZE] {
    let wire = sent.recv().await.expect("a frame to respond to");
    let codec = FrameCodec::new();
    let response = Frame {
        device: wire[0],
        command: wire[1],
        sequence: wire[2].wrapping_add(sequence_delta),
        payload,
    };
    mock.push_inbound(codec.to_wire(&response));
    wire
}

/// Inject a telemetry event frame.
pub(crate) fn push_event(mock: &MockChannel, device: u8, command: u8, payload_bytes: &[u8]) {
    let mut payload = [0u8; PAYLOAD_SIZE];
    payload[..payload_bytes.len()].copy_from_slice(payload_bytes);
    let codec = FrameCodec::new();
    let wire = codec.to_wire(&Frame {
        device,
        command,
        sequence: 0,
        payload,
    });
    mock.push_inbound(wire);
}
