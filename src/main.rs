//! lotdb CLI entry point
//!
//! A minimal entrypoint: parse arguments, dispatch to the CLI commands,
//! report failures (JSON error response on stdout, one line on stderr), and
//! exit non-zero. All logic lives in the CLI module.

use lotdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
