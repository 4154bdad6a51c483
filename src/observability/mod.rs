//! Structured logging
//!
//! One JSON object per line, written synchronously with no buffering.
//! Field ordering is deterministic so identical events produce identical
//! lines.

mod logger;

pub use logger::{Logger, Severity};
