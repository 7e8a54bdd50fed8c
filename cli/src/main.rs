use std::path::PathBuf;

use clap::Parser;
use log::info;
use slatesync_core::{Decoder, ToneParams};

use slatesync_cli::{edl, rename, scan};

/// Pair separately recorded audio and video takes by their embedded slate
/// tone, rename them to the decoded key and emit one EDL per matched pair.
#[derive(Parser)]
#[command(name = "slatesync")]
struct Cli {
    /// Directory of video takes
    video_dir: PathBuf,

    /// Directory of audio takes
    audio_dir: PathBuf,

    /// Directory the EDL files are written to
    edl_dir: PathBuf,

    /// Project frames per second
    fps: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if !(cli.fps > 0.0) {
        return Err(format!("fps must be positive, got {}", cli.fps).into());
    }

    let decoder = Decoder::new(ToneParams::default());

    let mut audio_takes = scan::analyse_directory(&cli.audio_dir, &decoder)?;
    let mut video_takes = scan::analyse_directory(&cli.video_dir, &decoder)?;
    info!(
        "{} audio and {} video takes carry a valid tone",
        audio_takes.len(),
        video_takes.len()
    );

    rename::rename_takes(&mut audio_takes, "a");
    rename::rename_takes(&mut video_takes, "v");

    edl::generate_edls(&video_takes, &audio_takes, cli.fps, &cli.edl_dir)?;

    Ok(())
}
