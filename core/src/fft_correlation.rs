//! FFT-backed linear convolution and cross-correlation for real signals.
//!
//! Output sizing follows the scipy conventions: `Full` is the complete
//! result of length `N + M - 1`, `Same` the centered slice matching the
//! first input, `Valid` only the fully overlapping region of length
//! `N - M + 1` (empty when the kernel outgrows the signal).

use crate::error::{Result, SlateToneError};
use realfft::RealFftPlanner;

/// Output trimming mode, after scipy.signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Complete result, `signal.len() + kernel.len() - 1` samples.
    Full,
    /// Centered slice of the full result, `signal.len()` samples.
    Same,
    /// Fully overlapping region only, `signal.len() - kernel.len() + 1` samples.
    Valid,
}

/// Linear convolution of `signal` with `kernel`.
///
/// In `Same` mode the slice starts `(kernel.len() - 1) / 2` into the full
/// result, so output sample `i` lines up with input sample `i` to within
/// half a sample for a linear-phase kernel.
pub fn fft_convolve_1d(signal: &[f32], kernel: &[f32], mode: Mode) -> Result<Vec<f32>> {
    padded_spectrum_product(signal, kernel, false, mode)
}

/// Cross-correlation of `signal` with `template`.
///
/// For real inputs this is convolution with the template reversed in time.
/// In `Valid` mode, output index `i` scores the window starting at
/// `signal[i]`; in `Full` mode the same window lands at index
/// `i + template.len() - 1`.
pub fn fft_correlate_1d(signal: &[f32], template: &[f32], mode: Mode) -> Result<Vec<f32>> {
    padded_spectrum_product(signal, template, true, mode)
}

fn padded_spectrum_product(
    signal: &[f32],
    kernel: &[f32],
    reverse_kernel: bool,
    mode: Mode,
) -> Result<Vec<f32>> {
    if signal.is_empty() || kernel.is_empty() {
        return Ok(Vec::new());
    }

    let output_len = signal.len() + kernel.len() - 1;
    let fft_size = output_len.next_power_of_two();

    let mut padded_signal = vec![0.0; fft_size];
    let mut padded_kernel = vec![0.0; fft_size];
    padded_signal[..signal.len()].copy_from_slice(signal);
    if reverse_kernel {
        for (dst, &src) in padded_kernel.iter_mut().zip(kernel.iter().rev()) {
            *dst = src;
        }
    } else {
        padded_kernel[..kernel.len()].copy_from_slice(kernel);
    }

    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(fft_size);
    let c2r = planner.plan_fft_inverse(fft_size);

    let mut signal_spectrum = r2c.make_output_vec();
    let mut kernel_spectrum = r2c.make_output_vec();
    r2c.process(&mut padded_signal, &mut signal_spectrum)
        .map_err(|e| SlateToneError::FftError(format!("forward FFT failed: {e:?}")))?;
    r2c.process(&mut padded_kernel, &mut kernel_spectrum)
        .map_err(|e| SlateToneError::FftError(format!("forward FFT failed: {e:?}")))?;

    for (s, &k) in signal_spectrum.iter_mut().zip(&kernel_spectrum) {
        *s *= k;
    }

    let mut result = vec![0.0; fft_size];
    c2r.process(&mut signal_spectrum, &mut result)
        .map_err(|e| SlateToneError::FftError(format!("inverse FFT failed: {e:?}")))?;

    // realfft leaves the round trip scaled by the transform size
    let scale = fft_size as f32;
    for v in &mut result {
        *v /= scale;
    }

    Ok(match mode {
        Mode::Full => {
            result.truncate(output_len);
            result
        }
        Mode::Same => {
            let start = (output_len - signal.len()) / 2;
            result[start..start + signal.len()].to_vec()
        }
        Mode::Valid => {
            if signal.len() < kernel.len() {
                Vec::new()
            } else {
                let start = kernel.len() - 1;
                result[start..start + signal.len() - kernel.len() + 1].to_vec()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_convolve(signal: &[f32], kernel: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; signal.len() + kernel.len() - 1];
        for (i, &s) in signal.iter().enumerate() {
            for (j, &k) in kernel.iter().enumerate() {
                out[i + j] += s * k;
            }
        }
        out
    }

    #[test]
    fn test_mode_lengths() {
        let signal = vec![1.0; 100];
        let kernel = vec![1.0; 10];

        let full = fft_convolve_1d(&signal, &kernel, Mode::Full).unwrap();
        let same = fft_convolve_1d(&signal, &kernel, Mode::Same).unwrap();
        let valid = fft_convolve_1d(&signal, &kernel, Mode::Valid).unwrap();

        assert_eq!(full.len(), 109);
        assert_eq!(same.len(), 100);
        assert_eq!(valid.len(), 91);
    }

    #[test]
    fn test_valid_empty_when_kernel_longer() {
        let signal = vec![1.0, 2.0];
        let kernel = vec![1.0; 10];
        let valid = fft_correlate_1d(&signal, &kernel, Mode::Valid).unwrap();
        assert!(valid.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(fft_convolve_1d(&[], &[1.0], Mode::Full).unwrap().is_empty());
        assert!(fft_convolve_1d(&[1.0], &[], Mode::Full).unwrap().is_empty());
        assert!(fft_correlate_1d(&[], &[], Mode::Valid).unwrap().is_empty());
    }

    #[test]
    fn test_convolve_matches_naive() {
        let signal: Vec<f32> = (0..57).map(|i| ((i * 37) % 11) as f32 - 5.0).collect();
        let kernel = vec![0.5, -1.0, 0.25, 2.0];

        let fft = fft_convolve_1d(&signal, &kernel, Mode::Full).unwrap();
        let naive = naive_convolve(&signal, &kernel);

        assert_eq!(fft.len(), naive.len());
        for (a, b) in fft.iter().zip(&naive) {
            assert!((a - b).abs() < 1e-3, "fft={a} naive={b}");
        }
    }

    #[test]
    fn test_correlate_is_reversed_convolution() {
        let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let template = vec![0.5, 1.0, 1.5];
        let reversed: Vec<f32> = template.iter().rev().copied().collect();

        let corr = fft_correlate_1d(&signal, &template, Mode::Full).unwrap();
        let conv = fft_convolve_1d(&signal, &reversed, Mode::Full).unwrap();

        for (a, b) in corr.iter().zip(&conv) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_correlate_impulse_shifts_signal() {
        let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let template = vec![1.0, 0.0, 0.0];
        let full = fft_correlate_1d(&signal, &template, Mode::Full).unwrap();

        assert_eq!(full.len(), 7);
        for (i, expected) in [1.0, 2.0, 3.0, 4.0, 5.0].iter().enumerate() {
            assert!((full[i + 2] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_valid_is_slice_of_full() {
        let signal: Vec<f32> = (0..40).map(|i| (i as f32 * 0.3).sin()).collect();
        let template = vec![0.2, -0.4, 0.6, -0.8];

        let full = fft_correlate_1d(&signal, &template, Mode::Full).unwrap();
        let valid = fft_correlate_1d(&signal, &template, Mode::Valid).unwrap();

        let start = template.len() - 1;
        assert_eq!(valid.len(), signal.len() - template.len() + 1);
        for (i, v) in valid.iter().enumerate() {
            assert!((v - full[start + i]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_same_is_centered_slice_of_full() {
        let signal: Vec<f32> = (0..31).map(|i| (i % 7) as f32).collect();
        let kernel = vec![0.25; 8];

        let full = fft_convolve_1d(&signal, &kernel, Mode::Full).unwrap();
        let same = fft_convolve_1d(&signal, &kernel, Mode::Same).unwrap();

        let start = (full.len() - signal.len()) / 2;
        for (i, v) in same.iter().enumerate() {
            assert!((v - full[start + i]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_autocorrelation_peak_at_zero_lag() {
        let signal: Vec<f32> = (0..64)
            .map(|i| (2.0 * std::f32::consts::PI * i as f32 / 16.0).sin())
            .collect();
        let full = fft_correlate_1d(&signal, &signal, Mode::Full).unwrap();

        let sum_sq: f32 = signal.iter().map(|x| x * x).sum();
        let zero_lag = full[signal.len() - 1];
        assert!((zero_lag - sum_sq).abs() < 0.05);
        for v in &full {
            assert!(*v <= zero_lag + 1e-3);
        }
    }
}
