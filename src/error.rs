//! Error types for nightplan

use thiserror::Error;

/// Result type for nightplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a night report
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A time string could not be parsed
    #[error("Invalid time '{value}': {reason}")]
    Time { value: String, reason: String },

    /// A coordinate string could not be parsed
    #[error("Invalid coordinate '{0}'")]
    Coordinate(String),

    /// An almanac event search failed (e.g. polar day/night)
    #[error("Almanac error: {0}")]
    Almanac(String),

    /// A remote or local lookup failed for one body at one instant
    #[error("Lookup failed for '{target}': {reason}")]
    Lookup { target: String, reason: String },

    /// Every classification strategy was exhausted for one identifier
    #[error("Target '{0}' could not be resolved by any strategy")]
    Unresolved(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}
