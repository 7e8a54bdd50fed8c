//! Shared encoder/decoder parameters.

use crate::error::{Result, SlateToneError};
use crate::{BIT_DURATION, CARRIER_FREQ, CHIRP_DURATION, CHIRP_F0, CHIRP_F1};

/// Physical parameters of the slate tone, shared by encoder and decoder.
///
/// The sample rate is deliberately absent: recordings arrive at whatever
/// rate the device used, so it is taken from each waveform instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    /// Seconds of carrier per bit.
    pub bit_duration: f64,
    /// BPSK carrier frequency, Hz.
    pub carrier_freq: f64,
    /// Chirp sweep start frequency, Hz.
    pub chirp_f0: f64,
    /// Chirp sweep end frequency, Hz.
    pub chirp_f1: f64,
    /// Chirp length, seconds.
    pub chirp_duration: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            bit_duration: BIT_DURATION,
            carrier_freq: CARRIER_FREQ,
            chirp_f0: CHIRP_F0,
            chirp_f1: CHIRP_F1,
            chirp_duration: CHIRP_DURATION,
        }
    }
}

/// Per-bit timing derived from the tone parameters and a concrete rate.
///
/// `chunk_samples` must come out identical on the encoding and decoding
/// side for the bits to line up; both sides derive it through this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkTiming {
    bit_duration: f64,
    carrier_freq: f64,
    sample_rate: u32,
    chunk_samples: usize,
}

impl ChunkTiming {
    /// Rejects timings that round to fewer than two samples per chunk,
    /// below which a chunk cannot hold even one carrier oscillation sign.
    pub fn new(bit_duration: f64, carrier_freq: f64, sample_rate: u32) -> Result<Self> {
        let chunk_samples = (bit_duration * f64::from(sample_rate)).round() as usize;
        if chunk_samples < 2 {
            return Err(SlateToneError::InvalidChunkTiming(format!(
                "{bit_duration} s per bit at {sample_rate} Hz gives {chunk_samples} samples per chunk"
            )));
        }
        Ok(Self {
            bit_duration,
            carrier_freq,
            sample_rate,
            chunk_samples,
        })
    }

    pub fn from_params(params: &ToneParams, sample_rate: u32) -> Result<Self> {
        Self::new(params.bit_duration, params.carrier_freq, sample_rate)
    }

    pub fn bit_duration(&self) -> f64 {
        self.bit_duration
    }

    pub fn carrier_freq(&self) -> f64 {
        self.carrier_freq
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn chunk_samples(&self) -> usize {
        self.chunk_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_samples_rounding() {
        let timing = ChunkTiming::new(0.05, 4000.0, 5000).unwrap();
        assert_eq!(timing.chunk_samples(), 250);

        let timing = ChunkTiming::new(0.05, 4000.0, 44100).unwrap();
        assert_eq!(timing.chunk_samples(), 2205);
    }

    #[test]
    fn test_degenerate_timing_rejected() {
        let err = ChunkTiming::new(0.0001, 4000.0, 5000).unwrap_err();
        match err {
            SlateToneError::InvalidChunkTiming(_) => {}
            other => panic!("expected InvalidChunkTiming, got {other:?}"),
        }
    }

    #[test]
    fn test_two_sample_chunk_accepted() {
        let timing = ChunkTiming::new(0.0004, 4000.0, 5000).unwrap();
        assert_eq!(timing.chunk_samples(), 2);
    }

    #[test]
    fn test_default_params() {
        let params = ToneParams::default();
        assert_eq!(params.carrier_freq, crate::CARRIER_FREQ);
        let timing = ChunkTiming::from_params(&params, 48000).unwrap();
        assert_eq!(timing.chunk_samples(), 2400);
    }
}
