//! Extraction strategy implementations.
//!
//! Four methods, ordered most structured to most generic:
//!
//! 1. [`StructuredExtractor`] - semantic containers (`<main>`,
//!    `<article>`, known content ids/classes)
//! 2. [`ArticleExtractor`] - paragraph-density heuristics
//! 3. [`ReadabilityExtractor`] - readability-style node scoring
//! 4. [`PlainTextExtractor`] - strip all markup, keep everything
//!
//! The orchestrator tries them in this order and accepts the first
//! result that survives cleaning and the minimum-length check.

mod article;
mod fetch;
mod plain;
mod readability;
mod structured;

pub use article::ArticleExtractor;
pub use plain::PlainTextExtractor;
pub use readability::ReadabilityExtractor;
pub use structured::StructuredExtractor;

use std::sync::Arc;

use crate::traits::ExtractStrategy;

/// The default strategy set in preference order, sharing one HTTP client.
pub fn default_strategies() -> Vec<Arc<dyn ExtractStrategy>> {
    let client = fetch::build_client();
    vec![
        Arc::new(StructuredExtractor::new(client.clone())),
        Arc::new(ArticleExtractor::new(client.clone())),
        Arc::new(ReadabilityExtractor::new(client.clone())),
        Arc::new(PlainTextExtractor::new(client)),
    ]
}
