//! Command-line interface for lotdb
//!
//! Commands:
//! - init: create a default configuration file
//! - add: insert one vehicle and persist the inventory
//! - list: print every vehicle
//! - manufacturers: print group names and car counts
//! - stats: counts and averages
//! - search-price / search-age: range searches

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_response};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Init { config } => commands::init(&config),
        Command::Add {
            config,
            manufacturer,
            price,
            age,
            distance,
        } => commands::add(&config, manufacturer, price, age, distance),
        Command::List { config } => commands::list(&config),
        Command::Manufacturers { config } => commands::manufacturers(&config),
        Command::Stats { config } => commands::stats(&config),
        Command::SearchPrice {
            config,
            min_price,
            max_price,
            min_distance,
            max_distance,
        } => commands::search_price(&config, min_price, max_price, min_distance, max_distance),
        Command::SearchAge {
            config,
            min_age,
            max_age,
        } => commands::search_age(&config, min_age, max_age),
    }
}
