//! Byte-channel transport abstraction.
//!
//! The protocol stack never talks to a BLE crate directly; it drives any
//! transport that can ship opaque 20-byte frames both ways and perform a
//! handful of plain informational reads. The real robot exposes this over
//! a Nordic-style UART service; tests use an in-memory channel.

use std::future::Future;

use thiserror::Error;
use tokio::sync::mpsc;

use rootbot_protocol::FRAME_SIZE;

// UUIDs of the real BLE transport, for implementations that target it.

/// UART service carrying the framed protocol.
pub const UART_SERVICE: &str = "6e400001-b5a3-f393-e0a9-e50e24dcca9e";
/// Host → robot frame characteristic.
pub const TX_CHARACTERISTIC: &str = "6e400002-b5a3-f393-e0a9-e50e24dcca9e";
/// Robot → host notification characteristic.
pub const RX_CHARACTERISTIC: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";
/// Device-information service holding the plain info characteristics.
pub const DEVICE_INFORMATION_SERVICE: &str = "0000180a-0000-1000-8000-00805f9b34fb";

/// Errors produced by a byte-channel implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel is closed or was never opened.
    #[error("channel closed")]
    Closed,

    /// A transport-level failure, described by the implementation.
    #[error("transport error: {0}")]
    Transport(String),
}

/// The informational values readable outside the framed protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoItem {
    /// Product serial number string.
    SerialNumber,
    /// Firmware version string.
    FirmwareVersion,
    /// Hardware version string.
    HardwareVersion,
    /// Manufacturer string.
    Manufacturer,
    /// Two-byte sensor/battery status bitfield.
    RobotState,
}

/// A duplex byte channel to one robot.
///
/// Implementations take `&self` everywhere; transports that need mutable
/// state use interior mutability, which matches how BLE handles are
/// usually shared.
pub trait ByteChannel: Send + Sync + 'static {
    /// Establish the transport-level connection to the addressed robot.
    fn connect(&self) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Enumerate services/characteristics after connecting.
    fn discover_capabilities(&self) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Begin delivering inbound notification frames.
    ///
    /// May be called once per connection; a second call fails.
    fn subscribe_frames(
        &self,
    ) -> Result<mpsc::UnboundedReceiver<[u8; FRAME_SIZE]>, ChannelError>;

    /// Write one frame to the robot.
    fn send_frame(
        &self,
        frame: [u8; FRAME_SIZE],
    ) -> impl Future<Output = Result<(), ChannelError>> + Send;

    /// Read one of the plain informational values.
    fn read_info(
        &self,
        item: InfoItem,
    ) -> impl Future<Output = Result<Vec<u8>, ChannelError>> + Send;
}
