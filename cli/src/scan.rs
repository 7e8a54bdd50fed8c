//! Directory analysis: decode the slate tone of every take in a directory.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use slatesync_core::Decoder;

use crate::audio::read_normalized;

/// One file whose slate tone decoded and passed the checksum; the join
/// record for pairing and EDL emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeRecord {
    pub path: PathBuf,
    /// The decoded 3-byte identifier.
    pub key: [u8; 3],
    /// Sample index one past the end of the sync chirp.
    pub sync_offset: usize,
    pub sample_rate: u32,
    pub length_samples: usize,
}

/// Decode every regular file in `dir`, one worker per file.
///
/// Files that cannot be read and files without a valid tone are logged and
/// skipped; neither aborts the batch. The result order follows the sorted
/// file listing, but nothing downstream depends on it.
pub fn analyse_directory(dir: &Path, decoder: &Decoder) -> std::io::Result<Vec<TakeRecord>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    Ok(paths
        .par_iter()
        .filter_map(|path| analyse_file(path, decoder))
        .collect())
}

fn analyse_file(path: &Path, decoder: &Decoder) -> Option<TakeRecord> {
    let waveform = match read_normalized(path) {
        Ok(waveform) => waveform,
        Err(err) => {
            warn!("could not open {}: {err}", path.display());
            return None;
        }
    };
    let sample_rate = waveform.sample_rate();
    let length_samples = waveform.len();

    let result = match decoder.decode(&waveform) {
        Ok(result) => result,
        Err(err) => {
            warn!("could not analyse {}: {err}", path.display());
            return None;
        }
    };
    info!("{} analysed", path.display());

    if !result.valid {
        return None;
    }
    Some(TakeRecord {
        path: path.to_path_buf(),
        key: [result.frame[0], result.frame[1], result.frame[2]],
        sync_offset: result.sync_offset,
        sample_rate,
        length_samples,
    })
}
