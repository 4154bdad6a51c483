//! Snapshot persistence errors

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for snapshot operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// File could not be opened, read, written, or renamed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file's bytes do not form a valid record at the given offset.
    #[error("snapshot corruption at byte {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// The file does not start with the snapshot magic bytes.
    #[error("not a lotdb snapshot (bad magic)")]
    BadMagic,

    /// The file declares a format version this build cannot read.
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u16),

    /// Structurally valid file whose contents violate a collection
    /// invariant (capacity limits, group name uniqueness).
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl StorageError {
    /// I/O error carrying the path it occurred on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Corruption error tagged with the byte offset it was detected at.
    pub fn corruption_at(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corruption_display_carries_offset() {
        let err = StorageError::corruption_at(1024, "checksum mismatch");
        let shown = err.to_string();
        assert!(shown.contains("1024"));
        assert!(shown.contains("checksum mismatch"));
    }

    #[test]
    fn test_io_error_carries_path_and_source() {
        let err = StorageError::io(
            Path::new("/tmp/lot.dat"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/lot.dat"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
