//! Table-driven CRC-8 checksum engine.
//!
//! Configuration used by the robot's frame protocol:
//!
//! - Width: 8
//! - Polynomial: 0x07 (CCITT)
//! - Initial value: 0x00
//! - No input/output reflection, no final XOR
//! - MSB-first bit processing
//!
//! The checksum covers the first 19 bytes of a frame (header + payload),
//! never the trailing CRC byte itself.

/// The CCITT CRC-8 polynomial.
pub const CRC8_POLY_CCITT: u8 = 0x07;

/// CRC-8 calculator with a precomputed 256-entry lookup table.
#[derive(Debug, Clone)]
pub struct Crc8 {
    table: [u8; 256],
}

impl Crc8 {
    /// Build the lookup table for the given polynomial.
    pub fn new(polynomial: u8) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut curr = i as u8;
            for _ in 0..8 {
                if curr & 0x80 != 0 {
                    curr = (curr << 1) ^ polynomial;
                } else {
                    curr <<= 1;
                }
            }
            *entry = curr;
        }
        Crc8 { table }
    }

    /// Compute the checksum of `data`, starting from 0x00.
    pub fn checksum(&self, data: &[u8]) -> u8 {
        let mut acc = 0u8;
        for &byte in data {
            acc = self.table[(acc ^ byte) as usize];
        }
        acc
    }
}

impl Default for Crc8 {
    fn default() -> Self {
        Crc8::new(CRC8_POLY_CCITT)
    }
}
