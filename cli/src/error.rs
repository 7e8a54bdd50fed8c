use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unsupported or corrupt WAV {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("unsupported sample format in {path}: {detail}")]
    SampleFormat { path: PathBuf, detail: String },

    #[error(transparent)]
    Codec(#[from] slatesync_core::SlateToneError),
}
