//! The fixed 4-byte frame: three identifier bytes plus an additive
//! mod-255 checksum.
//!
//! The checksum is deliberately weak (8 bits over a 24-bit payload) and is
//! the sole integrity gate: a failed check means the candidate decode is
//! discarded, with no retry or correction.

pub const FRAME_BYTES: usize = 4;

/// Pack bits into bytes, most-significant bit first.
///
/// Trailing bits that do not fill a whole byte are dropped; the decoder
/// always requests a multiple of eight, so a remainder only appears when
/// the waveform was cut short.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

/// Expand bytes into bits, most-significant bit first. Inverse of
/// [`pack_bits`] over whole bytes.
pub fn unpack_bytes(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// Additive checksum over the three identifier bytes.
pub fn checksum(payload: &[u8; 3]) -> u8 {
    ((u16::from(payload[0]) + u16::from(payload[1]) + u16::from(payload[2])) % 255) as u8
}

/// True iff `frame` holds at least [`FRAME_BYTES`] bytes and the fourth
/// matches the checksum of the first three.
pub fn checksum_valid(frame: &[u8]) -> bool {
    frame.len() >= FRAME_BYTES && checksum(&[frame[0], frame[1], frame[2]]) == frame[3]
}

/// The on-air frame: identifier plus checksum, built before modulation and
/// rebuilt after demodulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_BYTES],
}

impl Frame {
    pub fn new(payload: [u8; 3]) -> Self {
        Self {
            bytes: [payload[0], payload[1], payload[2], checksum(&payload)],
        }
    }

    pub fn payload(&self) -> [u8; 3] {
        [self.bytes[0], self.bytes[1], self.bytes[2]]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    pub fn to_bits(self) -> Vec<bool> {
        unpack_bytes(&self.bytes)
    }
}
