//! WAV loading for the batch tool.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use slatesync_core::Waveform;

use crate::error::CliError;

/// Read a WAV file as a mono waveform with samples normalized to [-1, 1].
///
/// 8/16-bit and 24/32-bit integer PCM and 32-bit float files are accepted;
/// multi-channel files are averaged down to one channel.
pub fn read_normalized(path: &Path) -> Result<Waveform, CliError> {
    let mut reader = WavReader::open(path).map_err(|source| CliError::Wav {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = reader.spec();

    let mono = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, bits @ 1..=16) => {
            let scale = (1i64 << (bits - 1)) as f32;
            mix_down(
                reader.samples::<i16>().map(|s| s.map(|v| f32::from(v) / scale)),
                spec.channels,
            )
        }
        (SampleFormat::Int, bits @ 17..=32) => {
            let scale = (1i64 << (bits - 1)) as f32;
            mix_down(
                reader.samples::<i32>().map(|s| s.map(|v| v as f32 / scale)),
                spec.channels,
            )
        }
        (SampleFormat::Float, 32) => mix_down(reader.samples::<f32>(), spec.channels),
        (format, bits) => {
            return Err(CliError::SampleFormat {
                path: path.to_path_buf(),
                detail: format!("{bits}-bit {format:?}"),
            })
        }
    }
    .map_err(|source| CliError::Wav {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Waveform::new(mono, spec.sample_rate))
}

fn mix_down<I>(samples: I, channels: u16) -> Result<Vec<f32>, hound::Error>
where
    I: Iterator<Item = Result<f32, hound::Error>>,
{
    let channels = channels.max(1) as usize;
    let mut mono = Vec::new();
    let mut acc = 0.0f32;
    let mut filled = 0usize;
    for sample in samples {
        acc += sample?;
        filled += 1;
        if filled == channels {
            mono.push(acc / channels as f32);
            acc = 0.0;
            filled = 0;
        }
    }
    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, spec: WavSpec, frames: &[Vec<i16>]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &sample in frame {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_reads_mono_16_bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        write_wav(&path, spec, &[vec![16384], vec![-16384], vec![0]]);

        let wave = read_normalized(&path).unwrap();
        assert_eq!(wave.sample_rate(), 8000);
        assert_eq!(wave.len(), 3);
        assert!((wave.samples()[0] - 0.5).abs() < 1e-4);
        assert!((wave.samples()[1] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_stereo_averaged_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        write_wav(&path, spec, &[vec![16384, 0], vec![-16384, -16384]]);

        let wave = read_normalized(&path).unwrap();
        assert_eq!(wave.len(), 2);
        assert!((wave.samples()[0] - 0.25).abs() < 1e-4);
        assert!((wave.samples()[1] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_audio.wav");
        std::fs::write(&path, b"definitely not a wav").unwrap();
        assert!(read_normalized(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_normalized(Path::new("/nonexistent/take.wav")).is_err());
    }
}
