//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lotdb - a strict, bounded vehicle sales inventory store
#[derive(Parser, Debug)]
#[command(name = "lotdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,
    },

    /// Add one vehicle to the inventory and persist it
    Add {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,

        /// Manufacturer name (non-empty)
        #[arg(long)]
        manufacturer: String,

        /// Sale price
        #[arg(long)]
        price: i64,

        /// Age in years
        #[arg(long)]
        age: i32,

        /// Distance traveled in kilometers
        #[arg(long)]
        distance: f64,
    },

    /// Print every vehicle in the inventory
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,
    },

    /// Print manufacturer groups and their car counts
    Manufacturers {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,
    },

    /// Print counts and average age, distance, and price
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,
    },

    /// Search by price and distance ranges (all bounds inclusive)
    SearchPrice {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,

        #[arg(long)]
        min_price: i64,

        #[arg(long)]
        max_price: i64,

        #[arg(long)]
        min_distance: f64,

        #[arg(long)]
        max_distance: f64,
    },

    /// Search by age range; a max age of -1 means no upper bound
    SearchAge {
        /// Path to configuration file
        #[arg(long, default_value = "./lotdb.json")]
        config: PathBuf,

        #[arg(long)]
        min_age: i32,

        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        max_age: i32,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
