//! Error types for the quantum lab core

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors reported by the simulation core.
///
/// Every variant is recoverable: the caller can correct the request and
/// retry. Randomness itself never produces an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LabError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decryption failed: {0}")]
    MalformedInput(String),

    #[error("Requested {requested} bits exceeds the configured limit of {limit}")]
    ResourceLimitExceeded { requested: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}
