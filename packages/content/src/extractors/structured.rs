//! Structured-content extractor.
//!
//! Looks for the semantic containers well-formed article pages use
//! (`<main>`, `<article>`, `[role='main']`, common content ids and
//! classes) and takes the text of the first match. Highest fidelity
//! when it applies, so it runs first.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use super::fetch;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::ExtractStrategy;

const CONTENT_SELECTORS: [&str; 8] = [
    "main",
    "article",
    "[role='main']",
    "#content",
    "#main",
    ".content",
    ".post-content",
    ".entry-content",
];

pub struct StructuredExtractor {
    client: reqwest::Client,
}

impl StructuredExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn extract_from_html(html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        for selector_str in CONTENT_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            if let Some(node) = document.select(&selector).next() {
                let text = node.text().collect::<Vec<_>>().join(" ");
                if !text.trim().is_empty() {
                    return Some(text);
                }
            }
        }

        None
    }
}

#[async_trait]
impl ExtractStrategy for StructuredExtractor {
    fn name(&self) -> &'static str {
        "structured"
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> ExtractResult<String> {
        let html = fetch::fetch_html(&self.client, url, timeout).await?;
        Self::extract_from_html(&html).ok_or(ExtractError::NoContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_main_element() {
        let html = r#"
            <html><body>
                <nav>Navigation junk</nav>
                <main><p>The actual article body.</p></main>
                <footer>Footer junk</footer>
            </body></html>
        "#;
        let text = StructuredExtractor::extract_from_html(html).unwrap();
        assert!(text.contains("The actual article body."));
        assert!(!text.contains("Navigation junk"));
    }

    #[test]
    fn test_falls_through_to_content_class() {
        let html = r#"<div class="post-content"><p>Classed content.</p></div>"#;
        let text = StructuredExtractor::extract_from_html(html).unwrap();
        assert!(text.contains("Classed content."));
    }

    #[test]
    fn test_no_semantic_container_is_none() {
        let html = "<div><p>Unmarked content.</p></div>";
        assert!(StructuredExtractor::extract_from_html(html).is_none());
    }
}
