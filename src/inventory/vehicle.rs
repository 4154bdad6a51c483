//! Vehicle sale record

use serde::Serialize;

/// A single vehicle sale record.
///
/// Immutable after creation; fields are read through accessors only.
/// Two vehicles are equal when all fields are equal: a vehicle has no
/// identity beyond its field values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    manufacturer: String,
    price: i64,
    age: i32,
    distance_km: f64,
}

impl Vehicle {
    /// Creates a new vehicle record.
    ///
    /// The manufacturer name must be non-empty; the inventory routes records
    /// into groups by this name.
    pub fn new(manufacturer: impl Into<String>, price: i64, age: i32, distance_km: f64) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            price,
            age,
            distance_km,
        }
    }

    /// Manufacturer name as supplied at creation.
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Sale price.
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Age in years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Distance traveled in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}
