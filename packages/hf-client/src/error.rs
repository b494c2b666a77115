//! Error types for the Hugging Face client.

use thiserror::Error;

/// Result type for Hugging Face client operations.
pub type Result<T> = std::result::Result<T, HfError>;

/// Hugging Face client errors.
#[derive(Debug, Error)]
pub enum HfError {
    /// Configuration error (missing API token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout) after exhausting retries
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response that is not retryable, or retries exhausted)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response envelope)
    #[error("Parse error: {0}")]
    Parse(String),
}
