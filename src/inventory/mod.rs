//! Vehicle sale inventory core
//!
//! Owns the manufacturer-grouped collection of vehicle sale records and
//! implements insertion with capacity enforcement, aggregate statistics,
//! range search, and whole-collection snapshot save/load.
//!
//! Capacity is a hard contract: at most [`MAX_MANUFACTURERS`] groups
//! store-wide and at most [`MAX_CARS_PER_MANUFACTURER`] cars per group.
//! Hitting either limit is an ordinary [`AddOutcome`], never an error.

mod group;
mod search;
mod store;
mod vehicle;

pub use group::ManufacturerGroup;
pub use search::{AgeRange, PriceDistanceRange, UNBOUNDED_AGE};
pub use store::{AddOutcome, Inventory};
pub use vehicle::Vehicle;

/// Maximum number of manufacturer groups held by one inventory.
pub const MAX_MANUFACTURERS: usize = 20;

/// Maximum number of cars filed under one manufacturer group.
pub const MAX_CARS_PER_MANUFACTURER: usize = 20;
