//! Process exit codes returned by [`crate::run`].

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Bad input, bad configuration, engine or I/O failure.
pub const ERROR: i32 = 2;

/// Stopped before finishing, same code a shell reports for Ctrl+C.
pub const INTERRUPTED: i32 = 130;

pub fn for_error(error: &CliError) -> i32 {
    match error {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}
