//! Error types for radix_merkle

use thiserror::Error;

/// Result type alias for radix_merkle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the (infallible) trie operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Config error: {0}")]
    Config(String),
}
