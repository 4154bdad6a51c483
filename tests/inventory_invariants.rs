//! Inventory Invariant Tests
//!
//! End-to-end checks of the store's contract:
//! - Capacity limits hold at the 21st insert, as return values not errors
//! - Case-insensitive manufacturer grouping
//! - Aggregates return zero on an empty store
//! - Search bounds are inclusive; -1 is the unbounded-age sentinel
//! - Save sorts, save/load round-trips, empty saves touch nothing
//! - Failed loads leave prior state unchanged

use lotdb::inventory::{
    AddOutcome, Inventory, Vehicle, MAX_CARS_PER_MANUFACTURER, MAX_MANUFACTURERS, UNBOUNDED_AGE,
};
use lotdb::storage::StorageError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn car(manufacturer: &str, price: i64, age: i32, distance: f64) -> Vehicle {
    Vehicle::new(manufacturer, price, age, distance)
}

fn filled_store() -> Inventory {
    let mut store = Inventory::new();
    store.add_car(car("Volvo", 31000, 2, 18000.0));
    store.add_car(car("Audi", 45000, 1, 9000.5));
    store.add_car(car("Audi", 22000, 6, 91000.0));
    store.add_car(car("Mazda", 9000, 11, 160000.0));
    store
}

// =============================================================================
// Capacity Tests
// =============================================================================

/// The 21st distinct manufacturer is refused and the count stays at 20.
#[test]
fn test_manufacturer_capacity() {
    let mut store = Inventory::new();
    for i in 0..MAX_MANUFACTURERS {
        let outcome = store.add_car(car(&format!("Maker{:02}", i), 1000, 1, 1000.0));
        assert_eq!(outcome, AddOutcome::Added);
    }

    let outcome = store.add_car(car("OneTooMany", 1000, 1, 1000.0));
    assert_eq!(outcome, AddOutcome::ManufacturerCapacityExceeded);
    assert_eq!(store.manufacturer_count(), MAX_MANUFACTURERS);
}

/// The 21st car for one manufacturer is refused and the group stays at 20.
#[test]
fn test_car_capacity_per_manufacturer() {
    let mut store = Inventory::new();
    for i in 0..MAX_CARS_PER_MANUFACTURER {
        let outcome = store.add_car(car("Toyota", i as i64, 1, 1000.0));
        assert_eq!(outcome, AddOutcome::Added);
    }

    let outcome = store.add_car(car("Toyota", 9999, 1, 1000.0));
    assert_eq!(outcome, AddOutcome::CarCapacityExceeded);
    assert_eq!(store.manufacturers()[0].car_count(), MAX_CARS_PER_MANUFACTURER);
}

/// Cars count always equals the sum of group car counts.
#[test]
fn test_cars_count_equals_group_sum() {
    let store = filled_store();
    let sum: usize = store.manufacturers().iter().map(|g| g.car_count()).sum();
    assert_eq!(store.cars_count(), sum);
}

// =============================================================================
// Grouping Tests
// =============================================================================

/// "Toyota" and "TOYOTA" resolve to the same group.
#[test]
fn test_case_insensitive_grouping() {
    let mut store = Inventory::new();
    assert_eq!(store.add_car(car("Toyota", 10000, 3, 30000.0)), AddOutcome::Added);
    assert_eq!(store.add_car(car("TOYOTA", 12000, 5, 80000.0)), AddOutcome::Added);

    assert_eq!(store.manufacturer_count(), 1);
    assert_eq!(store.manufacturers()[0].car_count(), 2);
}

// =============================================================================
// Aggregate Tests
// =============================================================================

/// Empty-store averages are all zero, not a division failure.
#[test]
fn test_empty_store_averages_are_zero() {
    let store = Inventory::new();
    assert_eq!(store.average_age(), 0.0);
    assert_eq!(store.average_distance(), 0.0);
    assert_eq!(store.average_price(), 0.0);
}

/// Averages divide the field sum by the total car count.
#[test]
fn test_averages_over_all_groups() {
    let store = filled_store();
    assert_eq!(store.average_age(), 5.0);
    assert_eq!(store.average_price(), 26750.0);
    assert!((store.average_distance() - 69500.125).abs() < 1e-9);
}

// =============================================================================
// Search Tests
// =============================================================================

/// Age search with the -1 sentinel keeps everything at or above the minimum.
#[test]
fn test_age_search_with_sentinel() {
    let mut store = Inventory::new();
    for age in [3, 5, 8, 12] {
        store.add_car(car("A", 1000, age, 1000.0));
    }

    let matches = store.search_by_age(5, UNBOUNDED_AGE);
    let ages: Vec<i32> = matches.iter().map(|c| c.age()).collect();
    assert_eq!(ages, vec![5, 8, 12]);
}

/// Price/distance search requires both ranges; either field out of range
/// excludes the record even when the other is inside.
#[test]
fn test_price_distance_search_requires_both() {
    let mut store = Inventory::new();
    store.add_car(car("A", 15000, 1, 25000.0));
    store.add_car(car("A", 25000, 1, 25000.0)); // price out of range
    store.add_car(car("A", 15000, 1, 60000.0)); // distance out of range

    let matches = store.search_by_price_and_distance(10000, 20000, 0.0, 50000.0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].price(), 15000);
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// Round trip: the flattened car set survives by field equality and the
/// loaded groups are name-ascending sorted.
#[test]
fn test_save_load_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lot.dat");

    let mut store = filled_store();
    store.save(&path).unwrap();

    let mut restored = Inventory::new();
    restored.load(&path).unwrap();

    let names: Vec<&str> = restored.manufacturers().iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["Audi", "Mazda", "Volvo"]);

    let mut original = store.all_cars();
    let mut loaded = restored.all_cars();
    let key = |c: &Vehicle| (c.manufacturer().to_string(), c.price(), c.age());
    original.sort_by_key(key);
    loaded.sort_by_key(key);
    assert_eq!(original, loaded);
}

/// Saving an empty store creates no file and leaves an existing one alone.
#[test]
fn test_empty_save_touches_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lot.dat");

    let mut store = Inventory::new();
    store.save(&path).unwrap();
    assert!(!path.exists());

    std::fs::write(&path, b"prior contents").unwrap();
    store.save(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"prior contents");
}

/// A load failure propagates as a storage error and leaves the prior
/// in-memory state unchanged.
#[test]
fn test_failed_load_preserves_state() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lot.dat");
    std::fs::write(&path, b"definitely not a snapshot").unwrap();

    let mut store = filled_store();
    let before = store.all_cars();

    let err = store.load(&path).unwrap_err();
    assert!(matches!(
        err,
        StorageError::BadMagic | StorageError::Corruption { .. }
    ));
    assert_eq!(store.all_cars(), before);
}

/// Loading a missing file is an I/O error, also state-preserving.
#[test]
fn test_load_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();

    let mut store = filled_store();
    let err = store.load(&tmp.path().join("absent.dat")).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
    assert_eq!(store.cars_count(), 4);
}
