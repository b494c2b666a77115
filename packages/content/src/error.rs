//! Typed errors for the content library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during content operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Every extraction strategy failed or produced too little text
    #[error("extraction failed for {url}: {}", format_attempts(.attempts))]
    ExtractionFailed {
        url: String,
        attempts: Vec<StrategyFailure>,
    },

    /// Model call failed after exhausting retries, or returned an
    /// empty/malformed payload
    #[error("model error: {0}")]
    Model(#[from] hf_client::HfError),

    /// Malformed request parameters
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Required credential or setting missing
    #[error("config error: {0}")]
    Config(String),
}

/// Why a single extraction strategy was rejected.
#[derive(Debug, Clone)]
pub struct StrategyFailure {
    /// Strategy name (for operator-facing logs)
    pub strategy: &'static str,

    /// Failure reason
    pub reason: String,
}

fn format_attempts(attempts: &[StrategyFailure]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.strategy, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from a single extraction strategy attempt.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Fetch exceeded the strategy timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Markup parsed but no usable content found
    #[error("no content found")]
    NoContent,
}

/// Result type alias for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Result type alias for a single strategy attempt.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failed_lists_strategies() {
        let err = ContentError::ExtractionFailed {
            url: "https://example.com".into(),
            attempts: vec![
                StrategyFailure {
                    strategy: "structured",
                    reason: "HTTP error: 404".into(),
                },
                StrategyFailure {
                    strategy: "plain",
                    reason: "no content found".into(),
                },
            ],
        };

        let message = err.to_string();
        assert!(message.contains("structured"));
        assert!(message.contains("plain"));
        assert!(message.contains("https://example.com"));
    }
}
