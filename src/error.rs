//! Error types for the pokedex client
//!
//! Provides unified error handling using thiserror. Cache misses are not
//! errors and never appear here.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for fetching and command execution.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport failure talking to the upstream API
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// Configured base URL cannot be used to build request URLs
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Payload (fresh or cached) could not be decoded
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input did not name a known command
    #[error("command not found: {0}")]
    UnknownCommand(String),

    /// Command was given the wrong arguments
    #[error("usage: {0}")]
    Usage(String),

    #[error("cannot go back, already on the first page")]
    NoPreviousPage,

    #[error("no more location areas to show")]
    NoMorePages,

    /// Reading input or writing output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
