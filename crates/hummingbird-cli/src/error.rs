//! Hummingbird CLI — error types.

use hummingbird_core::error::EventError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be decoded, validated or encoded.
    #[error(transparent)]
    Event(#[from] EventError),

    /// A command was invoked with arguments it cannot act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
