//! Rename matched takes after their decoded key.

use std::path::PathBuf;

use log::{info, warn};

use crate::scan::TakeRecord;

/// `10-20-30_a.wav`-style file name for a record: decimal key bytes joined
/// by dashes, a role suffix, and the original extension.
pub fn keyed_file_name(record: &TakeRecord, suffix: &str) -> String {
    let [a, b, c] = record.key;
    let ext = record
        .path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{a}-{b}-{c}_{suffix}{ext}")
}

/// Rename every record's file in place. Paths inside the records are
/// updated so later stages see the new names; a failed rename keeps the
/// old path and is only logged.
pub fn rename_takes(records: &mut [TakeRecord], suffix: &str) {
    for record in records {
        let target: PathBuf = record.path.with_file_name(keyed_file_name(record, suffix));
        if target == record.path {
            continue;
        }
        match std::fs::rename(&record.path, &target) {
            Ok(()) => {
                info!("renamed {} -> {}", record.path.display(), target.display());
                record.path = target;
            }
            Err(err) => warn!("could not rename {}: {err}", record.path.display()),
        }
    }
}
