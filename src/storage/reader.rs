//! Snapshot reader with strict validation
//!
//! Reads are checksum-verified record by record, and a snapshot is only
//! handed to the caller once the whole file has parsed cleanly and the
//! collection invariants (capacity limits, group name uniqueness) hold.
//! Nothing out of contract is accepted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::inventory::{ManufacturerGroup, MAX_CARS_PER_MANUFACTURER, MAX_MANUFACTURERS};

use super::errors::{StorageError, StorageResult};
use super::record::{decode_group, FORMAT_VERSION, MIN_RECORD_SIZE, SNAPSHOT_MAGIC};

/// Reads whole-collection snapshots.
pub struct SnapshotReader {
    path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
    saved_at: String,
    group_count: u32,
    groups_read: u32,
}

impl SnapshotReader {
    /// Opens a snapshot file and validates its header.
    ///
    /// Fails with [`StorageError::Io`] when the file cannot be opened,
    /// [`StorageError::BadMagic`] / [`StorageError::UnsupportedVersion`]
    /// when the header does not identify a readable snapshot.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| StorageError::io(path, e))?
            .len();

        let mut reader = Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
            saved_at: String::new(),
            group_count: 0,
            groups_read: 0,
        };
        reader.read_header()?;
        Ok(reader)
    }

    fn read_header(&mut self) -> StorageResult<()> {
        let mut magic = [0u8; 4];
        self.read_exact(&mut magic, "snapshot magic")?;
        if magic != SNAPSHOT_MAGIC {
            return Err(StorageError::BadMagic);
        }

        let mut version_buf = [0u8; 2];
        self.read_exact(&mut version_buf, "format version")?;
        let version = u16::from_le_bytes(version_buf);
        if version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion(version));
        }

        let mut len_buf = [0u8; 4];
        self.read_exact(&mut len_buf, "saved-at length")?;
        let saved_at_len = u32::from_le_bytes(len_buf) as u64;
        if self.current_offset + saved_at_len > self.file_size {
            return Err(StorageError::corruption_at(
                self.current_offset,
                format!("saved-at length {} exceeds file size", saved_at_len),
            ));
        }
        let mut saved_at_buf = vec![0u8; saved_at_len as usize];
        self.read_exact(&mut saved_at_buf, "saved-at timestamp")?;
        self.saved_at = String::from_utf8(saved_at_buf).map_err(|e| {
            StorageError::corruption_at(
                self.current_offset,
                format!("saved-at is not UTF-8: {}", e),
            )
        })?;

        let mut count_buf = [0u8; 4];
        self.read_exact(&mut count_buf, "group count")?;
        self.group_count = u32::from_le_bytes(count_buf);

        Ok(())
    }

    /// Path of the snapshot being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved-at timestamp recorded in the header.
    pub fn saved_at(&self) -> &str {
        &self.saved_at
    }

    /// Number of group records the header declares.
    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    /// Reads the next group record, verifying its checksum.
    ///
    /// Returns `Ok(None)` once every declared record has been read and the
    /// file holds no trailing bytes.
    pub fn read_next(&mut self) -> StorageResult<Option<ManufacturerGroup>> {
        if self.groups_read == self.group_count {
            if self.current_offset < self.file_size {
                return Err(StorageError::corruption_at(
                    self.current_offset,
                    "trailing bytes after final group record",
                ));
            }
            return Ok(None);
        }

        let record_start = self.current_offset;
        let remaining = self.file_size - record_start;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption_at(
                record_start,
                format!(
                    "truncated snapshot: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.read_exact(&mut len_buf, "record length")?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption_at(
                record_start,
                format!("invalid record length: {}", record_length),
            ));
        }
        if record_length > remaining {
            return Err(StorageError::corruption_at(
                record_start,
                format!(
                    "record length {} exceeds remaining file size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);
        self.read_exact(&mut record_buf[4..], "record body")?;

        let (group, _consumed) = decode_group(&record_buf)
            .map_err(|e| StorageError::corruption_at(record_start, e.to_string()))?;

        self.groups_read += 1;
        Ok(Some(group))
    }

    /// Reads every remaining group record.
    pub fn read_all(&mut self) -> StorageResult<Vec<ManufacturerGroup>> {
        let mut groups = Vec::new();
        while let Some(group) = self.read_next()? {
            groups.push(group);
        }
        Ok(groups)
    }

    /// Reads and fully validates a snapshot file.
    ///
    /// The returned groups satisfy every collection invariant; a file that
    /// parses but violates one is rejected with
    /// [`StorageError::InvalidSnapshot`].
    pub fn read_snapshot(path: &Path) -> StorageResult<Vec<ManufacturerGroup>> {
        let mut reader = Self::open(path)?;
        let groups = reader.read_all()?;
        validate_invariants(&groups)?;
        Ok(groups)
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &str) -> StorageResult<()> {
        let offset = self.current_offset;
        self.reader.read_exact(buf).map_err(|e| {
            StorageError::corruption_at(offset, format!("failed to read {}: {}", what, e))
        })?;
        self.current_offset += buf.len() as u64;
        Ok(())
    }
}

/// Checks the collection invariants on a fully parsed snapshot.
fn validate_invariants(groups: &[ManufacturerGroup]) -> StorageResult<()> {
    if groups.len() > MAX_MANUFACTURERS {
        return Err(StorageError::InvalidSnapshot(format!(
            "{} manufacturer groups, maximum is {}",
            groups.len(),
            MAX_MANUFACTURERS
        )));
    }

    for group in groups {
        if group.car_count() > MAX_CARS_PER_MANUFACTURER {
            return Err(StorageError::InvalidSnapshot(format!(
                "group '{}' holds {} cars, maximum is {}",
                group.name(),
                group.car_count(),
                MAX_CARS_PER_MANUFACTURER
            )));
        }
    }

    for (i, group) in groups.iter().enumerate() {
        for other in &groups[i + 1..] {
            if group.name().eq_ignore_ascii_case(other.name()) {
                return Err(StorageError::InvalidSnapshot(format!(
                    "duplicate manufacturer name: '{}' and '{}'",
                    group.name(),
                    other.name()
                )));
            }
        }
    }

    Ok(())
}
