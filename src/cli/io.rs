//! JSON output handling for CLI
//!
//! Every command writes exactly one JSON object to stdout:
//! `{"status":"ok","data":...}` on success, or
//! `{"status":"error","code":...,"message":...}` on failure.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(json!({
        "status": "error",
        "code": code,
        "message": message
    }))
}

fn write_line(response: Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
