//! Error types for bitsieve.

use std::io;
use thiserror::Error;

/// The result type used throughout bitsieve.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for filter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred while writing or reading a stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An invalid argument was provided (empty key, bad sizes, wrong raw length).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input ended before the expected layout was complete.
    #[error("Truncated input: {0}")]
    TruncatedInput(String),

    /// The configuration header could not be parsed.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new truncated input error.
    pub fn truncated(msg: impl Into<String>) -> Self {
        Error::TruncatedInput(msg.into())
    }

    /// Creates a new invalid header error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Error::InvalidHeader(msg.into())
    }
}
