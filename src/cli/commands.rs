//! CLI command implementations
//!
//! Every command is a thin driver over the inventory core: load the
//! snapshot named by the config (or start empty when none exists yet), run
//! one operation, persist when the operation changed state, and write a
//! single JSON response.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::inventory::{AddOutcome, Inventory, Vehicle};
use crate::observability::Logger;

use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the inventory snapshot file
    pub data_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: "./lot.dat".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        Ok(())
    }

    fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }
}

/// Create a default configuration file; refuses to overwrite one.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    let config = Config::default();
    let contents = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, contents)
        .map_err(|e| CliError::config_error(format!("Failed to write config: {}", e)))?;

    Logger::info(
        "CONFIG_CREATED",
        &[("path", &config_path.display().to_string())],
    );

    write_response(json!({
        "config": config_path.display().to_string(),
        "data_file": config.data_file,
    }))
}

/// Add one vehicle and persist the inventory when it changed.
pub fn add(
    config_path: &Path,
    manufacturer: String,
    price: i64,
    age: i32,
    distance: f64,
) -> CliResult<()> {
    if manufacturer.trim().is_empty() {
        return Err(CliError::invalid_argument("manufacturer must not be empty"));
    }

    let (mut inventory, data_path) = open_inventory(config_path)?;
    let outcome = inventory.add_car(Vehicle::new(manufacturer, price, age, distance));

    match outcome {
        AddOutcome::Added => {
            inventory.save(&data_path)?;
            Logger::info(
                "INVENTORY_SAVED",
                &[
                    ("path", &data_path.display().to_string()),
                    ("cars", &inventory.cars_count().to_string()),
                ],
            );
        }
        AddOutcome::CarCapacityExceeded | AddOutcome::ManufacturerCapacityExceeded => {
            // Expected outcome of bounded insertion, not an error.
            Logger::warn("CAPACITY_LIMIT_REACHED", &[("outcome", outcome.as_str())]);
        }
    }

    write_response(json!({
        "outcome": outcome.as_str(),
        "manufacturers": inventory.manufacturer_count(),
        "cars": inventory.cars_count(),
    }))
}

/// Print every vehicle in flattened order.
pub fn list(config_path: &Path) -> CliResult<()> {
    let (inventory, _) = open_inventory(config_path)?;

    write_response(json!({
        "count": inventory.cars_count(),
        "cars": inventory.all_cars(),
    }))
}

/// Print manufacturer groups and their car counts.
pub fn manufacturers(config_path: &Path) -> CliResult<()> {
    let (inventory, _) = open_inventory(config_path)?;

    let groups: Vec<Value> = inventory
        .manufacturers()
        .iter()
        .map(|g| json!({ "name": g.name(), "cars": g.car_count() }))
        .collect();

    write_response(json!({
        "count": inventory.manufacturer_count(),
        "manufacturers": groups,
    }))
}

/// Print counts and the three averages.
pub fn stats(config_path: &Path) -> CliResult<()> {
    let (inventory, _) = open_inventory(config_path)?;

    write_response(json!({
        "cars": inventory.cars_count(),
        "manufacturers": inventory.manufacturer_count(),
        "average_age": inventory.average_age(),
        "average_distance_km": inventory.average_distance(),
        "average_price": inventory.average_price(),
    }))
}

/// Search by inclusive price and distance ranges.
pub fn search_price(
    config_path: &Path,
    min_price: i64,
    max_price: i64,
    min_distance: f64,
    max_distance: f64,
) -> CliResult<()> {
    let (inventory, _) = open_inventory(config_path)?;

    let matches =
        inventory.search_by_price_and_distance(min_price, max_price, min_distance, max_distance);

    write_response(json!({
        "count": matches.len(),
        "matches": matches,
    }))
}

/// Search by inclusive age range; -1 as the maximum means no upper bound.
pub fn search_age(config_path: &Path, min_age: i32, max_age: i32) -> CliResult<()> {
    let (inventory, _) = open_inventory(config_path)?;

    let matches = inventory.search_by_age(min_age, max_age);

    write_response(json!({
        "count": matches.len(),
        "matches": matches,
    }))
}

/// Loads the inventory named by the config, or starts empty when no
/// snapshot file exists yet.
fn open_inventory(config_path: &Path) -> CliResult<(Inventory, PathBuf)> {
    let config = Config::load(config_path)?;
    let data_path = config.data_path();

    let mut inventory = Inventory::new();
    if data_path.exists() {
        inventory.load(&data_path)?;
        Logger::info(
            "INVENTORY_LOADED",
            &[
                ("path", &data_path.display().to_string()),
                ("manufacturers", &inventory.manufacturer_count().to_string()),
                ("cars", &inventory.cars_count().to_string()),
            ],
        );
    }

    Ok((inventory, data_path))
}
