//! One-JSON-document-per-frame record persistence

use crate::error::{IoError, Result};
use lidarfeat_core::ClusterRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the record file for a frame inside `dir`
pub fn frame_file_path(dir: &Path, frame_name: &str) -> PathBuf {
    dir.join(format!("{frame_name}.json"))
}

/// Whether a frame was already persisted
///
/// Used by callers iterating a dataset to decide whether to re-process a
/// frame or skip it.
pub fn frame_file_exists(dir: &Path, frame_name: &str) -> bool {
    frame_file_path(dir, frame_name).is_file()
}

/// Write a frame's surviving records as one pretty-printed JSON document
///
/// The file is named after the frame; an existing file is overwritten.
/// Concurrent writers are safe as long as each writes a distinct frame name,
/// which the pipeline's unique frame ids guarantee.
pub fn save_frame_records(
    dir: &Path,
    frame_name: &str,
    records: &[ClusterRecord],
) -> Result<PathBuf> {
    let path = frame_file_path(dir, frame_name);
    debug!(path = %path.display(), count = records.len(), "saving frame records");

    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(path)
}

/// Read a previously persisted frame document back into records
pub fn load_frame_records(path: &Path) -> Result<Vec<ClusterRecord>> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}
