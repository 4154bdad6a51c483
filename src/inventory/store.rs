//! The inventory store
//!
//! Owns the ordered sequence of manufacturer groups and implements the whole
//! query surface: bounded insertion, counts, flattened retrieval, averages,
//! range search, and snapshot save/load.
//!
//! Read operations flatten the groups on demand; nothing is cached or
//! indexed. Group order is insertion order except immediately before a save,
//! when groups are stable-sorted ascending by case-sensitive name.

use std::path::Path;

use crate::storage::{SnapshotReader, SnapshotWriter, StorageResult};

use super::group::ManufacturerGroup;
use super::search::{AgeRange, PriceDistanceRange};
use super::vehicle::Vehicle;
use super::MAX_MANUFACTURERS;

/// Outcome of one bounded insert.
///
/// Capacity is expected, recoverable control flow: both exceeded variants
/// leave the store unchanged, and none of them is an error or a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The car was filed into an existing or newly created group.
    Added,
    /// The car's manufacturer group already holds its maximum of 20 cars.
    CarCapacityExceeded,
    /// The store already holds its maximum of 20 manufacturer groups.
    ManufacturerCapacityExceeded,
}

impl AddOutcome {
    /// Stable lowercase name for responses and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddOutcome::Added => "added",
            AddOutcome::CarCapacityExceeded => "car_capacity_exceeded",
            AddOutcome::ManufacturerCapacityExceeded => "manufacturer_capacity_exceeded",
        }
    }
}

/// Bounded, manufacturer-grouped collection of vehicle sale records.
///
/// Starts empty. The group sequence and every nested car sequence are
/// exclusively owned by this instance; readers receive owned snapshots or
/// read-only views, never a mutable handle into internal storage.
#[derive(Debug, Default)]
pub struct Inventory {
    groups: Vec<ManufacturerGroup>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Whether the inventory holds no cars at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Files a car into its manufacturer group, creating the group if needed.
    ///
    /// The manufacturer match is case-insensitive (ASCII folding), so
    /// "Toyota" and "TOYOTA" land in the same group; at most one match can
    /// exist because group names are unique under that comparison.
    /// The car's manufacturer name must be non-empty.
    pub fn add_car(&mut self, car: Vehicle) -> AddOutcome {
        let existing = self
            .groups
            .iter_mut()
            .find(|g| g.name().eq_ignore_ascii_case(car.manufacturer()));

        match existing {
            Some(group) => {
                if group.add_car(car) {
                    AddOutcome::Added
                } else {
                    AddOutcome::CarCapacityExceeded
                }
            }
            None => {
                if self.groups.len() >= MAX_MANUFACTURERS {
                    return AddOutcome::ManufacturerCapacityExceeded;
                }
                let mut group = ManufacturerGroup::new(car.manufacturer());
                group.add_car(car);
                self.groups.push(group);
                AddOutcome::Added
            }
        }
    }

    /// Total number of cars across all groups.
    pub fn cars_count(&self) -> usize {
        self.groups.iter().map(ManufacturerGroup::car_count).sum()
    }

    /// Number of manufacturer groups.
    pub fn manufacturer_count(&self) -> usize {
        self.groups.len()
    }

    /// Every car in the inventory, flattened: group order, then per-group
    /// insertion order. Recomputed on every call.
    pub fn all_cars(&self) -> Vec<Vehicle> {
        let mut cars = Vec::with_capacity(self.cars_count());
        for group in &self.groups {
            cars.extend_from_slice(group.cars());
        }
        cars
    }

    /// Read-only view of the group sequence.
    pub fn manufacturers(&self) -> &[ManufacturerGroup] {
        &self.groups
    }

    /// Average age in years over all cars, `0.0` when the store is empty.
    pub fn average_age(&self) -> f64 {
        self.average_by(|car| car.age() as f64)
    }

    /// Average distance traveled in kilometers, `0.0` when empty.
    pub fn average_distance(&self) -> f64 {
        self.average_by(Vehicle::distance_km)
    }

    /// Average price over all cars, `0.0` when empty.
    pub fn average_price(&self) -> f64 {
        self.average_by(|car| car.price() as f64)
    }

    fn average_by(&self, field: impl Fn(&Vehicle) -> f64) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for group in &self.groups {
            for car in group.cars() {
                sum += field(car);
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Cars whose price and distance both fall inside the given inclusive
    /// ranges, in flattened order.
    pub fn search_by_price_and_distance(
        &self,
        min_price: i64,
        max_price: i64,
        min_distance: f64,
        max_distance: f64,
    ) -> Vec<Vehicle> {
        let range = PriceDistanceRange::new(min_price, max_price, min_distance, max_distance);
        self.all_cars()
            .into_iter()
            .filter(|car| range.matches(car))
            .collect()
    }

    /// Cars whose age falls inside `[min_age, max_age]` inclusive, in
    /// flattened order. A `max_age` of [`super::UNBOUNDED_AGE`] means
    /// "no upper bound".
    pub fn search_by_age(&self, min_age: i32, max_age: i32) -> Vec<Vehicle> {
        let range = AgeRange::new(min_age, max_age);
        self.all_cars()
            .into_iter()
            .filter(|car| range.matches(car))
            .collect()
    }

    /// Saves the whole collection to a snapshot file.
    ///
    /// An empty store is a no-op: no file is created and an existing file is
    /// left untouched. Otherwise groups are stable-sorted ascending by
    /// case-sensitive name (equal names keep their relative order) and the
    /// sorted sequence is written as one unit; the destination is replaced
    /// atomically or not at all.
    pub fn save(&mut self, path: &Path) -> StorageResult<()> {
        if self.groups.is_empty() {
            return Ok(());
        }
        self.groups.sort_by(|a, b| a.name().cmp(b.name()));
        SnapshotWriter::write(path, &self.groups)
    }

    /// Replaces the whole collection with the contents of a snapshot file.
    ///
    /// Wholesale substitution, no merge. The file is fully read and
    /// validated first; on any failure the prior in-memory state is left
    /// unchanged.
    pub fn load(&mut self, path: &Path) -> StorageResult<()> {
        let groups = SnapshotReader::read_snapshot(path)?;
        self.groups = groups;
        Ok(())
    }
}
