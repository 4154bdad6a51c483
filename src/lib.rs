//! lotdb - a strict, bounded vehicle sales inventory store
//!
//! A single-threaded, synchronous collection of vehicle sale records grouped
//! by manufacturer: bounded insertion (20 groups, 20 cars per group),
//! aggregate statistics, range search, and whole-collection snapshot
//! persistence with atomic replacement.

pub mod cli;
pub mod inventory;
pub mod observability;
pub mod storage;
