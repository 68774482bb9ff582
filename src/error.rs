//! Error types for flickster.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flickster.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    ApiKeyMissing,

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // Parse errors
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid record at position {position}: {reason}")]
    ItemParse { position: usize, reason: String },

    // Lookup errors
    #[error("Movie not found: {0}")]
    MovieNotFound(i64),

    // Saved state errors
    #[error("Invalid state file: {0}")]
    InvalidStateFile(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure half of a fetch outcome, as seen by screen controllers.
///
/// Per-record parse problems never reach this type; they are dropped
/// inside [`crate::core::records`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parse(msg) => FetchError::Parse(msg),
            Error::Json(e) => FetchError::Parse(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// Single success-or-failure result of one fetch.
pub type Outcome<T> = std::result::Result<Vec<T>, FetchError>;
