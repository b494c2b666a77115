//! Capability trait for pluggable extraction strategies.
//!
//! Each strategy is one algorithm for turning a fetched web page into
//! clean article text. Strategies are independent and independently
//! testable; the orchestrator in [`crate::extract`] iterates them in
//! preference order without knowing any strategy's internals, so new
//! strategies can be added without touching orchestration logic.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExtractResult;

/// One text-extraction method: `url -> text | failure`.
#[async_trait]
pub trait ExtractStrategy: Send + Sync {
    /// Strategy name (for logging and failure reports).
    fn name(&self) -> &'static str;

    /// Fetch the URL and extract raw text within the given timeout.
    ///
    /// Returns the extracted text without any quality guarantee; the
    /// orchestrator applies cleaning and the minimum-length check.
    async fn attempt(&self, url: &str, timeout: Duration) -> ExtractResult<String>;
}
