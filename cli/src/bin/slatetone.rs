use std::path::PathBuf;

use clap::Parser;
use hound::{SampleFormat, WavSpec, WavWriter};
use slatesync_core::{Encoder, ToneParams};

/// Write the audible slate tone for a 3-part identifier as a mono 16-bit
/// PCM WAV file, ready to be played while slating a take.
#[derive(Parser)]
#[command(name = "slatetone")]
struct Cli {
    /// First identifier byte (e.g. hour)
    hour: u8,

    /// Second identifier byte (e.g. minute)
    minute: u8,

    /// Third identifier byte (e.g. second)
    second: u8,

    /// Output WAV file
    output: PathBuf,

    /// Sample rate of the generated file
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let encoder = Encoder::new(ToneParams::default());
    let tone = encoder.encode([cli.hour, cli.minute, cli.second], cli.sample_rate)?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: cli.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&cli.output, spec)?;
    for &sample in tone.samples() {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * 32767.0) as i16)?;
    }
    writer.finalize()?;

    println!("wrote {} samples to {}", tone.len(), cli.output.display());
    Ok(())
}
