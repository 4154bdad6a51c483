//! Snapshot persistence for the inventory
//!
//! The whole collection is persisted as one unit: a header (magic, format
//! version, saved-at timestamp, group count) followed by one checksummed,
//! length-prefixed record per manufacturer group.
//!
//! # Design Principles
//!
//! - Whole-collection writes only; no partial or incremental format
//! - Checksum-verified on every read
//! - Atomic replacement: the destination file is renamed into place or left
//!   untouched
//! - Loads are all-or-nothing: a file is fully read and validated before any
//!   in-memory state is replaced

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StorageError, StorageResult};
pub use reader::SnapshotReader;
pub use record::{FORMAT_VERSION, SNAPSHOT_MAGIC};
pub use writer::SnapshotWriter;
