use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlateToneError {
    #[error("invalid chunk timing: {0}")]
    InvalidChunkTiming(String),

    #[error("not enough samples: {0}")]
    InsufficientData(String),

    #[error("FFT error: {0}")]
    FftError(String),
}

pub type Result<T> = std::result::Result<T, SlateToneError>;
