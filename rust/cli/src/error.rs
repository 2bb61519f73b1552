//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context; `sim`
//! uses it to report every hand that broke chip conservation before failing.

use holdem_engine::errors::{EquityError, GameError};
use std::fmt;

use crate::config::ConfigError;

/// Errors a command handler can return; `run` maps them to exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Output streams or the hand journal
    Io(std::io::Error),
    /// Card codes, seat counts, hand counts
    InvalidInput(String),
    /// `HOLDEM_*` variables or the config file
    Config(String),
    /// Table refused to deal or act
    Engine(String),
    /// Simulation stopped early on request
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let CliError::Io(e) = self {
            return Some(e);
        }
        None
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

// Equity failures come from user-supplied cards.
impl From<EquityError> for CliError {
    fn from(error: EquityError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// One failed item of a batch, with the context identifying it.
///
/// ```rust
/// use holdem_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "20250102-000003".to_string(),
///     message: "chips 1990 != 2000".to_string(),
/// };
/// assert_eq!(error.to_string(), "20250102-000003: chips 1990 != 2000");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    pub item_context: T,
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
