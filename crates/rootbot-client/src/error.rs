//! Client error types.

use std::time::Duration;

use thiserror::Error;

use crate::transport::ChannelError;
use rootbot_protocol::ProtocolError;

/// Errors surfaced by client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A parameter was rejected before any frame was built.
    #[error("validation error: {0}")]
    Validation(String),

    /// The connection is not in the `Ready` state.
    #[error("no active connection to a robot")]
    NotConnected,

    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// No matching response arrived before the deadline.
    #[error("no response within {after:?}")]
    Timeout {
        /// The deadline that expired.
        after: Duration,
    },

    /// A later request reused this request's correlation key and replaced
    /// its waiter. Only possible with 256+ requests in flight.
    #[error("pending request superseded by a colliding sequence id")]
    Superseded,

    /// The underlying byte channel failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// The connection lifecycle failed partway; the aggregate is back in
    /// the `Disconnected` state and must be explicitly retried.
    #[error("connection failed during {phase}: {source}")]
    ConnectionFailed {
        /// Which lifecycle phase failed.
        phase: &'static str,
        /// The underlying channel error.
        source: ChannelError,
    },
}
