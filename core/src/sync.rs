//! Chirp preamble generation and matched-filter sync detection.
//!
//! A swept-frequency chirp has a sharp, unambiguous autocorrelation peak
//! even after band-pass filtering, which makes it a robust start-of-tone
//! marker. Correlation magnitude is used rather than the signed value
//! because the data carrier's polarity is independent of the chirp's.

use std::f64::consts::PI;

use crate::error::{Result, SlateToneError};
use crate::fft_correlation::{fft_correlate_1d, Mode};
use crate::waveform::Waveform;

/// Generate a cosine-phase linear chirp sweeping `f0` to `f1` over
/// `duration` seconds.
///
/// The phase is the time integral of the instantaneous frequency, which
/// ramps linearly between the endpoints.
pub fn generate_chirp(f0: f64, f1: f64, duration: f64, sample_rate: u32) -> Waveform {
    let count = (duration * f64::from(sample_rate)).round() as usize;
    let rate = f64::from(sample_rate);
    let sweep = (f1 - f0) / duration;
    let samples = (0..count)
        .map(|i| {
            let t = i as f64 / rate;
            let phase = 2.0 * PI * (f0 * t + 0.5 * sweep * t * t);
            phase.cos() as f32
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

/// Locate the end of the sync chirp in a waveform.
///
/// Matched filtering: valid-mode cross-correlation against the reference,
/// peak of the absolute magnitude, first occurrence winning ties. The
/// returned offset is the peak index plus the reference length, i.e. one
/// sample past the end of the detected chirp, where the data chunks begin.
pub fn find_sync(waveform: &Waveform, reference: &Waveform) -> Result<usize> {
    let correlation = fft_correlate_1d(waveform.samples(), reference.samples(), Mode::Valid)?;
    if correlation.is_empty() {
        return Err(SlateToneError::InsufficientData(format!(
            "waveform of {} samples is shorter than the {}-sample sync reference",
            waveform.len(),
            reference.len()
        )));
    }
    Ok(peak_index(&correlation) + reference.len())
}

/// Index of the largest absolute value; the lowest index wins ties.
fn peak_index(correlation: &[f32]) -> usize {
    let mut best = 0;
    let mut best_magnitude = correlation[0].abs();
    for (i, &value) in correlation.iter().enumerate().skip(1) {
        if value.abs() > best_magnitude {
            best = i;
            best_magnitude = value.abs();
        }
    }
    best
}
