//! FIR band-pass filtering ahead of sync detection and demodulation.
//!
//! Broadband noise and harmonics outside the carrier band degrade both the
//! chirp correlation and the per-chunk bit decisions, so every decode pass
//! starts by narrowing the recording to the band around the carrier.

use std::f64::consts::PI;

use crate::error::Result;
use crate::fft_correlation::{fft_convolve_1d, Mode};
use crate::waveform::Waveform;
use crate::FILTER_TAPS;

/// Design a Hamming-windowed sinc band-pass kernel of [`FILTER_TAPS`] taps
/// passing `[center_freq - half_width, center_freq + half_width]`.
///
/// Band edges are clamped into (0, Nyquist) so the design is total; callers
/// must keep `half_width < center_freq` and the band inside Nyquist for the
/// response to mean anything. Passband-center gain is scaled to unity.
pub fn design_bandpass(center_freq: f64, half_width: f64, sample_rate: u32) -> Vec<f32> {
    let nyquist = f64::from(sample_rate) / 2.0;
    // Edges normalized so 1.0 is the Nyquist frequency.
    let lo = ((center_freq - half_width) / nyquist).clamp(1e-6, 1.0 - 2e-6);
    let hi = ((center_freq + half_width) / nyquist).clamp(lo + 1e-6, 1.0 - 1e-6);

    let mid = (FILTER_TAPS - 1) as f64 / 2.0;
    let mut taps: Vec<f64> = (0..FILTER_TAPS)
        .map(|k| {
            let x = k as f64 - mid;
            let ideal = hi * sinc(hi * x) - lo * sinc(lo * x);
            let window = 0.54 - 0.46 * (2.0 * PI * k as f64 / (FILTER_TAPS - 1) as f64).cos();
            ideal * window
        })
        .collect();

    // Unity gain at the middle of the passband.
    let center = 0.5 * (lo + hi);
    let gain: f64 = taps
        .iter()
        .enumerate()
        .map(|(k, &t)| t * (PI * center * (k as f64 - mid)).cos())
        .sum();
    if gain.abs() > f64::EPSILON {
        for t in &mut taps {
            *t /= gain;
        }
    }

    taps.into_iter().map(|t| t as f32).collect()
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Apply the band-pass kernel to a waveform.
///
/// Same-mode convolution keeps the output exactly as long as the input with
/// the kernel group delay compensated, so sample `i` of the output lines up
/// with sample `i` of the input.
pub fn bandpass(waveform: &Waveform, center_freq: f64, half_width: f64) -> Result<Waveform> {
    let taps = design_bandpass(center_freq, half_width, waveform.sample_rate());
    let filtered = fft_convolve_1d(waveform.samples(), &taps, Mode::Same)?;
    Ok(Waveform::new(filtered, waveform.sample_rate()))
}
