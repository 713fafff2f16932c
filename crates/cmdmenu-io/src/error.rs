//! Error types for reading menu input.

use std::io;

/// Errors that can occur while reading or interpreting a selection.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input stream reported a fault.
    #[error("Failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The line was not an integer.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// The integer does not name an option.
    #[error("{value} is not an option (expected 0 to {max})")]
    OutOfRange { value: i64, max: usize },
}
