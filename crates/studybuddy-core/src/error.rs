//! Error types for studybuddy-core

use thiserror::Error;

/// Result type alias using studybuddy-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in studybuddy-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure talking to the backend
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with something that is not the expected JSON envelope
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
