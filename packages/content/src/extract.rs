//! Extraction orchestrator.
//!
//! Tries each strategy in a fixed preference order and accepts the
//! first result that survives cleaning and the minimum-length check.
//! Strategies run strictly sequentially; only the first acceptable
//! result is needed, so speculative parallel fetches would just burn
//! bandwidth. When every strategy fails, the aggregated error carries
//! each strategy's failure reason for operator logs.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ContentError, Result, StrategyFailure};
use crate::extractors::default_strategies;
use crate::traits::ExtractStrategy;
use crate::types::ExtractedDocument;

/// Extracted text shorter than this is treated as noise, not success.
pub const DEFAULT_MIN_VIABLE_LEN: usize = 50;

/// Per-strategy fetch timeout.
const STRATEGY_TIMEOUT: Duration = Duration::from_secs(15);

/// Orchestrates the ordered strategy set.
pub struct Extractor {
    strategies: Vec<Arc<dyn ExtractStrategy>>,
    min_viable_len: usize,
}

impl Extractor {
    /// Create an extractor with the default strategy set.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// Create an extractor over a custom ordered strategy set.
    pub fn with_strategies(strategies: Vec<Arc<dyn ExtractStrategy>>) -> Self {
        Self {
            strategies,
            min_viable_len: DEFAULT_MIN_VIABLE_LEN,
        }
    }

    /// Override the minimum viable text length.
    pub fn with_min_viable_len(mut self, min_viable_len: usize) -> Self {
        self.min_viable_len = min_viable_len;
        self
    }

    /// Names of the configured strategies, in preference order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract clean article text from a URL.
    ///
    /// Short-circuits on the first strategy whose cleaned output meets
    /// the minimum viable length; later strategies are never invoked.
    pub async fn extract(&self, url: &str) -> Result<ExtractedDocument> {
        if !is_valid_url(url) {
            return Err(ContentError::Validation {
                reason: format!("invalid URL: {}", url),
            });
        }

        let mut attempts: Vec<StrategyFailure> = Vec::new();

        for strategy in &self.strategies {
            match strategy.attempt(url, STRATEGY_TIMEOUT).await {
                Ok(raw) => {
                    let text = clean_text(&raw);
                    if text.chars().count() >= self.min_viable_len {
                        info!(url = %url, strategy = %strategy.name(), len = text.len(), "Extraction succeeded");
                        return Ok(ExtractedDocument {
                            url: url.to_string(),
                            len: text.chars().count(),
                            text,
                            strategy: strategy.name(),
                        });
                    }
                    debug!(url = %url, strategy = %strategy.name(), len = text.len(), "Extracted text below minimum viable length");
                    attempts.push(StrategyFailure {
                        strategy: strategy.name(),
                        reason: format!("text too short ({} chars)", text.chars().count()),
                    });
                }
                Err(e) => {
                    debug!(url = %url, strategy = %strategy.name(), error = %e, "Strategy failed");
                    attempts.push(StrategyFailure {
                        strategy: strategy.name(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        warn!(url = %url, attempts = attempts.len(), "All extraction strategies failed");
        Err(ContentError::ExtractionFailed {
            url: url.to_string(),
            attempts,
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the string parses as an absolute http(s) URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => {
            (url.scheme() == "http" || url.scheme() == "https") && url.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Normalize extracted text.
///
/// Collapses runs of spaces/tabs to one space, runs of newlines to one,
/// strips other control characters, and trims the ends.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut pending_newline = false;

    for ch in text.chars() {
        match ch {
            '\n' | '\r' => pending_newline = true,
            c if c.is_whitespace() => pending_space = true,
            c if c.is_control() => {}
            c => {
                if pending_newline && !out.is_empty() {
                    out.push('\n');
                } else if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                pending_newline = false;
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStrategy;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a   b\t\tc"), "a b c");
        assert_eq!(clean_text("a\n\n\nb"), "a\nb");
        assert_eq!(clean_text("  padded  "), "padded");
        assert_eq!(clean_text("ctl\u{0000}char"), "ctlchar");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/article"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("https://"));
    }

    fn long_text() -> String {
        "A perfectly reasonable article body that easily clears the bar. ".repeat(3)
    }

    #[tokio::test]
    async fn test_short_circuits_on_first_success() {
        let first = MockStrategy::failing("structured", "HTTP error: 403");
        let second = MockStrategy::succeeding("article", long_text());
        let third = MockStrategy::succeeding("plain", long_text());
        let third_calls = third.calls();

        let extractor = Extractor::with_strategies(vec![
            Arc::new(first),
            Arc::new(second),
            Arc::new(third),
        ]);

        let doc = extractor.extract("https://example.com").await.unwrap();
        assert_eq!(doc.strategy, "article");
        assert_eq!(third_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_total_failure_lists_all_attempts() {
        let extractor = Extractor::with_strategies(vec![
            Arc::new(MockStrategy::failing("structured", "timeout")),
            Arc::new(MockStrategy::succeeding("article", "too short".to_string())),
        ]);

        let err = extractor.extract("https://example.com").await.unwrap_err();
        match err {
            ContentError::ExtractionFailed { attempts, .. } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].strategy, "structured");
                assert_eq!(attempts[1].strategy, "article");
                assert!(attempts[1].reason.contains("too short"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_any_attempt() {
        let strategy = MockStrategy::succeeding("structured", long_text());
        let calls = strategy.calls();
        let extractor = Extractor::with_strategies(vec![Arc::new(strategy)]);

        let err = extractor.extract("definitely not a url").await.unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cleaning_applied_to_accepted_text() {
        let messy = format!("  {}   \n\n\n{}  ", long_text(), long_text());
        let extractor =
            Extractor::with_strategies(vec![Arc::new(MockStrategy::succeeding("plain", messy))]);

        let doc = extractor.extract("https://example.com").await.unwrap();
        assert!(!doc.text.starts_with(' '));
        assert!(!doc.text.contains("\n\n"));
        assert!(!doc.text.contains("  "));
    }
}
