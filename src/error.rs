//! Error types for the chatfmt library.
//!
//! Formatting itself never fails; these errors come from the history store,
//! the relay configuration and the upstream exchange.

use std::io;
use thiserror::Error;

/// Result type alias for chatfmt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the formatter.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No API key was configured for the upstream service.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The upstream API answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, as received
        body: String,
    },

    /// The request never completed (connect, timeout, decode).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered successfully but carried no text.
    #[error("No response received from Gemini.")]
    EmptyReply,

    /// History index is out of range.
    #[error("History index {0} is out of range (history has {1} entries)")]
    HistoryIndex(usize, usize),

    /// No history entry carries the given id.
    #[error("Unknown history entry: {0}")]
    UnknownEntry(u64),

    /// Every entry id up to `u64::MAX` has been handed out.
    #[error("History has no entry ids left")]
    HistoryFull,
}

impl Error {
    /// HTTP status a relay should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::EmptyReply => 502,
            Error::InvalidConfig(_) => 400,
            _ => 500,
        }
    }
}
