//! Snapshot writer with atomic replacement
//!
//! The whole group sequence is serialized to a sibling temporary file,
//! fsynced, and renamed over the destination. A failure at any point leaves
//! the destination exactly as it was; the temporary file is removed best
//! effort on the error path.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::inventory::ManufacturerGroup;

use super::errors::{StorageError, StorageResult};
use super::record::{encode_group, write_string, FORMAT_VERSION, SNAPSHOT_MAGIC};

/// Writes whole-collection snapshots.
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Serializes `groups` to `path`, replacing any existing file atomically.
    ///
    /// The caller passes the groups already in their persisted order; the
    /// writer does not reorder them.
    pub fn write(path: &Path, groups: &[ManufacturerGroup]) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let tmp_path = temp_path(path)?;

        let result = Self::write_to_temp(&tmp_path, groups)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e)));

        if result.is_err() {
            // Already on the error path; removal is best effort.
            let _ = fs::remove_file(&tmp_path);
        }

        result
    }

    fn write_to_temp(tmp_path: &Path, groups: &[ManufacturerGroup]) -> StorageResult<()> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&SNAPSHOT_MAGIC);
        buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        write_string(&mut buf, &snapshot_timestamp());
        buf.extend_from_slice(&(groups.len() as u32).to_le_bytes());
        for group in groups {
            buf.extend_from_slice(&encode_group(group));
        }

        let mut file = File::create(tmp_path).map_err(|e| StorageError::io(tmp_path, e))?;
        file.write_all(&buf)
            .map_err(|e| StorageError::io(tmp_path, e))?;
        file.sync_all().map_err(|e| StorageError::io(tmp_path, e))
    }
}

/// Sibling temporary path for the in-progress snapshot.
fn temp_path(path: &Path) -> StorageResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// RFC3339 timestamp recorded in the snapshot header.
fn snapshot_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
