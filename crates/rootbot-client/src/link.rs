//! The shared capability bundle device handles operate through.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::connection::ConnectionState;
use crate::correlator::{RequestKey, ResponseCorrelator};
use crate::dispatcher::TelemetryDispatcher;
use crate::error::ClientError;
use crate::transport::ByteChannel;
use rootbot_protocol::{Command, Frame, FrameCodec, FRAME_SIZE, PAYLOAD_SIZE};

/// One connection's send / request / subscribe capabilities.
///
/// Device handles hold a clone of the link and never see the connection
/// aggregate itself. The link owns the only mutable shared state of the
/// protocol layer: the frame codec (with its sequence counter), the
/// pending-request table and the subscriber lists.
pub struct RobotLink<C: ByteChannel> {
    shared: Arc<LinkShared<C>>,
}

impl<C: ByteChannel> Clone for RobotLink<C> {
    fn clone(&self) -> Self {
        RobotLink {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct LinkShared<C> {
    channel: C,
    codec: Mutex<FrameCodec>,
    correlator: ResponseCorrelator,
    dispatcher: TelemetryDispatcher,
    state: Mutex<ConnectionState>,
    response_timeout: Duration,
}

impl<C: ByteChannel> RobotLink<C> {
    /// Wrap a channel with a fresh codec and empty tables.
    pub fn new(channel: C, response_timeout: Duration) -> Self {
        RobotLink {
            shared: Arc::new(LinkShared {
                channel,
                codec: Mutex::new(FrameCodec::new()),
                correlator: ResponseCorrelator::new(),
                dispatcher: TelemetryDispatcher::new(),
                state: Mutex::new(ConnectionState::Disconnected),
                response_timeout,
            }),
        }
    }

    /// The underlying byte channel.
    pub fn channel(&self) -> &C {
        &self.shared.channel
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock()
    }

    pub(crate) fn set_state(&self, state: ConnectionState) {
        *self.shared.state.lock() = state;
    }

    fn ensure_ready(&self) -> Result<(), ClientError> {
        match self.state() {
            ConnectionState::Ready => Ok(()),
            _ => Err(ClientError::NotConnected),
        }
    }

    fn encode(&self, command: &Command) -> Result<(Frame, [u8; FRAME_SIZE]), ClientError> {
        let mut codec = self.shared.codec.lock();
        let frame = codec.encode(command.device(), command.code(), &command.encode_payload())?;
        let wire = codec.to_wire(&frame);
        Ok((frame, wire))
    }

    /// Encode and transmit a command without waiting for a response.
    pub async fn send(&self, command: &Command) -> Result<Frame, ClientError> {
        self.ensure_ready()?;
        let (frame, wire) = self.encode(command)?;
        debug!("TX {}", hex::encode(wire));
        self.shared.channel.send_frame(wire).await?;
        Ok(frame)
    }

    /// Encode, transmit, and await the matching response payload.
    ///
    /// The matcher is registered before the frame leaves, so a response
    /// cannot race past it. If the configured deadline expires the
    /// matcher is removed and the call fails with [`ClientError::Timeout`]
    /// instead of pending forever.
    pub async fn request(&self, command: &Command) -> Result<[u8; PAYLOAD_SIZE], ClientError> {
        self.ensure_ready()?;
        let (frame, wire) = self.encode(command)?;
        let key = RequestKey::of(&frame);
        let waiter = self.shared.correlator.register(key);

        debug!("TX {}", hex::encode(wire));
        if let Err(err) = self.shared.channel.send_frame(wire).await {
            self.shared.correlator.remove(key);
            return Err(err.into());
        }

        let deadline = self.shared.response_timeout;
        match tokio::time::timeout(deadline, waiter).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(_)) => Err(ClientError::Superseded),
            Err(_) => {
                self.shared.correlator.remove(key);
                Err(ClientError::Timeout { after: deadline })
            }
        }
    }

    /// Subscribe to unclaimed frames from one device.
    pub fn subscribe(&self, device: u8) -> mpsc::UnboundedReceiver<Frame> {
        self.shared.dispatcher.subscribe(device)
    }

    /// Handle one inbound notification from the channel.
    ///
    /// Malformed frames are logged and dropped; a bad frame never
    /// disturbs unrelated pending requests. Valid frames are offered to
    /// the correlator first and fanned out as telemetry only if
    /// unclaimed.
    pub fn handle_inbound(&self, bytes: &[u8]) {
        let decoded = self.shared.codec.lock().decode(bytes);
        match decoded {
            Ok(frame) => {
                debug!("RX {}", hex::encode(bytes));
                if let Some(unclaimed) = self.shared.correlator.offer(frame) {
                    self.shared.dispatcher.dispatch(unclaimed);
                }
            }
            Err(err) => {
                warn!("dropping malformed frame ({}): {}", err, hex::encode(bytes));
            }
        }
    }

    /// Number of requests currently awaiting a response.
    pub fn pending_requests(&self) -> usize {
        self.shared.correlator.pending_count()
    }
}
