//! Async client for the Root drawing robot's framed BLE UART protocol.
//!
//! The crate is organized around three layers:
//!
//! - [`ByteChannel`]: the transport seam. Anything that can ship opaque
//!   20-byte frames both ways and answer a few plain informational reads
//!   can back a connection; tests use an in-memory channel.
//! - [`RobotLink`]: one connection's protocol engine. It frames commands
//!   with a per-connection sequence counter, matches responses to pending
//!   requests by the (device, command, sequence) triple under a mandatory
//!   deadline, and fans unclaimed frames out as telemetry.
//! - [`Connection`]: the lifecycle aggregate. It drives connect, service
//!   discovery, frame subscription and the identity reads, and hands out
//!   one typed handle per robot device.
//!
//! Wire-format types (frames, commands, events, CRC) live in
//! [`rootbot_protocol`], re-exported here as [`protocol`].

pub mod devices;

mod connection;
mod correlator;
mod dispatcher;
mod error;
mod link;
mod transport;

#[cfg(test)]
mod testutil;

pub use connection::{Connection, ConnectionConfig, ConnectionState};
pub use devices::EventStream;
pub use error::ClientError;
pub use link::RobotLink;
pub use transport::{
    ByteChannel, ChannelError, InfoItem, DEVICE_INFORMATION_SERVICE, RX_CHARACTERISTIC,
    TX_CHARACTERISTIC, UART_SERVICE,
};

pub use rootbot_protocol as protocol;
