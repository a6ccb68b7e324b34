//! Frame encoding/decoding utilities.
//!
//! Every message on the wire is exactly [`FRAME_SIZE`] bytes:
//!
//! ```text
//! offset 0    : device id
//! offset 1    : command id
//! offset 2    : sequence id (wraps 0..255)
//! offset 3-18 : payload, zero-padded to 16 bytes
//! offset 19   : CRC-8 over offsets 0..18
//! ```

use crate::constants::{FRAME_SIZE, PAYLOAD_SIZE};
use crate::crc8::Crc8;
use crate::error::ProtocolError;

/// A decoded (or to-be-encoded) frame.
///
/// The payload is always held zero-padded at its full wire width; the
/// logical payload length is not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Target or source device id.
    pub device: u8,
    /// Device-scoped command or event code.
    pub command: u8,
    /// Correlation tag, wraps 0..255.
    pub sequence: u8,
    /// Zero-padded payload.
    pub payload: [u8; PAYLOAD_SIZE],
}

/// Monotonically wrapping sequence-id generator.
///
/// One counter is shared by all outgoing frames of a single connection,
/// regardless of target device. It is owned by that connection's
/// [`FrameCodec`] — never global — so simultaneous robot connections do
/// not interfere.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: u8,
}

impl SequenceCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        SequenceCounter::default()
    }

    /// Allocate the next sequence id, wrapping 255 → 0.
    pub fn next(&mut self) -> u8 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Builds and parses wire frames.
///
/// Owns the connection's [`SequenceCounter`] and the CRC-8 lookup table.
#[derive(Debug)]
pub struct FrameCodec {
    crc: Crc8,
    sequence: SequenceCounter,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCodec {
    /// Create a new codec with a fresh sequence counter.
    pub fn new() -> Self {
        FrameCodec {
            crc: Crc8::default(),
            sequence: SequenceCounter::new(),
        }
    }

    /// Build a frame for transmission, allocating the next sequence id.
    ///
    /// The payload is zero-padded to the fixed width. A payload wider than
    /// [`PAYLOAD_SIZE`] is a caller error and is rejected, never silently
    /// truncated.
    pub fn encode(&mut self, device: u8, command: u8, payload: &[u8]) -> Result<Frame, ProtocolError> {
        if payload.len() > PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                max: PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        let mut padded = [0u8; PAYLOAD_SIZE];
        padded[..payload.len()].copy_from_slice(payload);

        Ok(Frame {
            device,
            command,
            sequence: self.sequence.next(),
            payload: padded,
        })
    }

    /// Produce the 20-byte wire image of a frame, CRC appended.
    pub fn to_wire(&self, frame: &Frame) -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[0] = frame.device;
        bytes[1] = frame.command;
        bytes[2] = frame.sequence;
        bytes[3..FRAME_SIZE - 1].copy_from_slice(&frame.payload);
        bytes[FRAME_SIZE - 1] = self.crc.checksum(&bytes[..FRAME_SIZE - 1]);
        bytes
    }

    /// Parse an inbound notification.
    ///
    /// Fails with [`ProtocolError::InvalidLength`] unless the input is
    /// exactly one frame, and with [`ProtocolError::ChecksumMismatch`] if
    /// the trailing CRC byte disagrees with the recomputed checksum.
    pub fn decode(&self, bytes: &[u8]) -> Result<Frame, ProtocolError> {
        if bytes.len() != FRAME_SIZE {
            return Err(ProtocolError::InvalidLength {
                expected: FRAME_SIZE,
                actual: bytes.len(),
            });
        }

        let expected = self.crc.checksum(&bytes[..FRAME_SIZE - 1]);
        let actual = bytes[FRAME_SIZE - 1];
        if expected != actual {
            return Err(ProtocolError::ChecksumMismatch { expected, actual });
        }

        let mut payload = [0u8; PAYLOAD_SIZE];
        payload.copy_from_slice(&bytes[3..FRAME_SIZE - 1]);

        Ok(Frame {
            device: bytes[0],
            command: bytes[1],
            sequence: bytes[2],
            payload,
        })
    }
}
