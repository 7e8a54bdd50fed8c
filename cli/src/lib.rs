//! Batch take-matching tool built on the slate-tone codec.
//!
//! Scans a video directory and an audio directory, decodes the embedded
//! identifier of every take, renames matched files to their key and emits
//! one CMX3600 EDL per matched pair.

pub mod audio;
pub mod edl;
pub mod error;
pub mod rename;
pub mod scan;

pub use error::CliError;
pub use scan::TakeRecord;
