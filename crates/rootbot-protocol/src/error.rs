//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Inbound data is not exactly one frame long.
    #[error("invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// The trailing CRC byte disagrees with the recomputed checksum.
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum recomputed over the frame body.
        expected: u8,
        /// Checksum byte carried by the frame.
        actual: u8,
    },

    /// An outgoing payload does not fit in the fixed payload area.
    #[error("payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum allowed length.
        max: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A recognized event carried an out-of-range field value.
    #[error("invalid value for {field}: 0x{value:02X}")]
    InvalidFieldValue {
        /// Name of the offending field.
        field: &'static str,
        /// The raw byte received.
        value: u8,
    },
}
