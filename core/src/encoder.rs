//! Slate tone synthesis: sync chirp followed by the BPSK-keyed frame.

use crate::config::{ChunkTiming, ToneParams};
use crate::error::Result;
use crate::framing::Frame;
use crate::modulate::modulate;
use crate::sync::generate_chirp;
use crate::waveform::Waveform;

pub struct Encoder {
    params: ToneParams,
}

impl Encoder {
    pub fn new(params: ToneParams) -> Self {
        Self { params }
    }

    /// Build the embeddable tone for a 3-byte identifier at the given rate.
    ///
    /// Layout: sync chirp, one reference chunk keyed to bit 0 (the value
    /// the differential demodulator seeds its running bit with), then the
    /// 32 frame bits.
    pub fn encode(&self, payload: [u8; 3], sample_rate: u32) -> Result<Waveform> {
        let timing = ChunkTiming::from_params(&self.params, sample_rate)?;
        let chirp = generate_chirp(
            self.params.chirp_f0,
            self.params.chirp_f1,
            self.params.chirp_duration,
            sample_rate,
        );

        let mut bits = vec![false];
        bits.extend(Frame::new(payload).to_bits());
        let tone = modulate(&bits, &timing);

        let mut samples = chirp.into_samples();
        samples.extend_from_slice(tone.samples());
        Ok(Waveform::new(samples, sample_rate))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(ToneParams::default())
    }
}
