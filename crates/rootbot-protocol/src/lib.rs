//! Root Robot UART Protocol
//!
//! This crate provides types and utilities for the framed command/telemetry
//! protocol spoken by the Root robot over its BLE "UART" characteristic pair.
//! Every exchange on the wire is a fixed 20-byte frame:
//!
//! ```text
//! +--------+---------+----------+------------------+-------+
//! | device | command | sequence | payload[0..16]   | crc8  |
//! +--------+---------+----------+------------------+-------+
//! ```
//!
//! Messages are one of:
//!
//! - **Commands** (host → robot): addressed to a device id with a
//!   device-scoped command code, built via [`Command`]
//! - **Responses** (robot → host): echo the `(device, command, sequence)`
//!   triple of the request they answer
//! - **Telemetry events** (robot → host, unsolicited): carry a fresh
//!   sequence id and decode via [`TelemetryEvent`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rootbot_protocol::{Command, Frame, FrameCodec};
//!
//! let mut codec = FrameCodec::new();
//! let cmd = Command::DriveDistance { distance_mm: 100 };
//! let frame = codec.encode(cmd.device(), cmd.code(), &cmd.encode_payload())?;
//! let wire = codec.to_wire(&frame);
//!
//! // Parse an inbound notification
//! let inbound = codec.decode(&received)?;
//! ```

mod commands;
mod constants;
mod crc8;
mod error;
mod events;
mod frame;
mod types;

pub use commands::*;
pub use constants::*;
pub use crc8::*;
pub use error::*;
pub use events::*;
pub use frame::*;
pub use types::*;
