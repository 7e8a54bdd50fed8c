//! BPSK chunk synthesis, the encoder path of the codec.

use std::f64::consts::PI;

use crate::config::ChunkTiming;
use crate::waveform::Waveform;

/// Modulate bits onto the carrier, one fixed-length chunk per bit.
///
/// Bit 1 emits the carrier at phase 0, bit 0 the same carrier inverted
/// (phase pi). Chunks are concatenated with no gap.
pub fn modulate(bits: &[bool], timing: &ChunkTiming) -> Waveform {
    let chunk = carrier_chunk(timing);
    let mut samples = Vec::with_capacity(bits.len() * chunk.len());
    for &bit in bits {
        if bit {
            samples.extend_from_slice(&chunk);
        } else {
            samples.extend(chunk.iter().map(|s| -s));
        }
    }
    Waveform::new(samples, timing.sample_rate())
}

/// One phase-0 carrier chunk. Shared with the coherent demodulator, which
/// uses it as its phase reference.
pub(crate) fn carrier_chunk(timing: &ChunkTiming) -> Vec<f32> {
    let rate = f64::from(timing.sample_rate());
    let omega = 2.0 * PI * timing.carrier_freq();
    (0..timing.chunk_samples())
        .map(|i| (omega * i as f64 / rate).sin() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> ChunkTiming {
        ChunkTiming::new(0.05, 1000.0, 5000).unwrap()
    }

    #[test]
    fn test_output_length() {
        let wave = modulate(&[true, false, true], &timing());
        assert_eq!(wave.len(), 3 * 250);
        assert_eq!(wave.sample_rate(), 5000);
    }

    #[test]
    fn test_one_bit_is_phase_zero_carrier() {
        let t = timing();
        let wave = modulate(&[true], &t);
        let chunk = carrier_chunk(&t);
        assert_eq!(wave.samples(), &chunk[..]);
    }

    #[test]
    fn test_zero_bit_is_inverted_carrier() {
        let t = timing();
        let one = modulate(&[true], &t);
        let zero = modulate(&[false], &t);
        for (a, b) in one.samples().iter().zip(zero.samples()) {
            assert_eq!(-a, *b);
        }
    }

    #[test]
    fn test_chunks_concatenate_gap_free() {
        let t = timing();
        let wave = modulate(&[true, true], &t);
        let single = modulate(&[true], &t);
        assert_eq!(&wave.samples()[..250], single.samples());
        assert_eq!(&wave.samples()[250..], single.samples());
    }

    #[test]
    fn test_empty_bits() {
        let wave = modulate(&[], &timing());
        assert!(wave.is_empty());
    }
}
