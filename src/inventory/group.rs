//! Manufacturer group: one manufacturer's owned sequence of vehicles
//!
//! The group enforces its own capacity on insert. Cars are kept in
//! insertion order; the group never reorders them.

use super::vehicle::Vehicle;
use super::MAX_CARS_PER_MANUFACTURER;

/// The vehicles filed under one manufacturer name.
///
/// Holds at most [`MAX_CARS_PER_MANUFACTURER`] cars. The cars vector is
/// private; callers read through [`cars`](Self::cars) and insert through
/// [`add_car`](Self::add_car), which refuses inserts at capacity.
#[derive(Debug, Clone)]
pub struct ManufacturerGroup {
    name: String,
    cars: Vec<Vehicle>,
}

impl ManufacturerGroup {
    /// Creates an empty group for the given manufacturer name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cars: Vec::new(),
        }
    }

    /// Reassembles a group from its stored parts.
    ///
    /// Callers uphold the capacity invariant; the snapshot reader validates
    /// car counts before constructing groups through this.
    pub(crate) fn from_parts(name: String, cars: Vec<Vehicle>) -> Self {
        Self { name, cars }
    }

    /// The manufacturer name this group is filed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the cars, in insertion order.
    pub fn cars(&self) -> &[Vehicle] {
        &self.cars
    }

    /// Number of cars currently in the group.
    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Whether the group has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.cars.len() >= MAX_CARS_PER_MANUFACTURER
    }

    /// Appends a car, refusing the insert when the group is full.
    ///
    /// Returns `true` when the car was added, `false` when the group is at
    /// capacity (the group is left unchanged).
    pub fn add_car(&mut self, car: Vehicle) -> bool {
        if self.is_full() {
            return false;
        }
        self.cars.push(car);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(price: i64) -> Vehicle {
        Vehicle::new("Honda", price, 3, 45000.0)
    }

    #[test]
    fn test_new_group_is_empty() {
        let group = ManufacturerGroup::new("Honda");
        assert_eq!(group.name(), "Honda");
        assert_eq!(group.car_count(), 0);
        assert!(!group.is_full());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut group = ManufacturerGroup::new("Honda");
        assert!(group.add_car(car(100)));
        assert!(group.add_car(car(200)));
        assert!(group.add_car(car(300)));

        let prices: Vec<i64> = group.cars().iter().map(|c| c.price()).collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn test_insert_refused_at_capacity() {
        let mut group = ManufacturerGroup::new("Honda");
        for i in 0..MAX_CARS_PER_MANUFACTURER {
            assert!(group.add_car(car(i as i64)));
        }
        assert!(group.is_full());

        // The 21st car is refused and the group is unchanged.
        assert!(!group.add_car(car(999)));
        assert_eq!(group.car_count(), MAX_CARS_PER_MANUFACTURER);
        assert!(group.cars().iter().all(|c| c.price() != 999));
    }
}
