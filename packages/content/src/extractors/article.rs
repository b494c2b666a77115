//! Article-heuristics extractor.
//!
//! Scores each container element by the total length of its direct
//! paragraph children and takes the densest one, prepending the page
//! title. Works on article pages that lack semantic markup.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use super::fetch;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::ExtractStrategy;

/// Containers under this much paragraph text are noise, not articles.
const MIN_PARAGRAPH_CHARS: usize = 120;

pub struct ArticleExtractor {
    client: reqwest::Client,
}

impl ArticleExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn extract_from_html(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let container_selector = Selector::parse("div, section, article, td").ok()?;

        let mut best: Option<(usize, Vec<String>)> = None;

        for container in document.select(&container_selector) {
            // Only direct <p> children count, so a page-level wrapper
            // does not absorb every paragraph on the page.
            let paragraphs: Vec<String> = container
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "p")
                .map(|p| p.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();

            let score: usize = paragraphs.iter().map(|p| p.chars().count()).sum();
            if score > best.as_ref().map(|(s, _)| *s).unwrap_or(0) {
                best = Some((score, paragraphs));
            }
        }

        let (score, paragraphs) = best?;
        if score < MIN_PARAGRAPH_CHARS {
            return None;
        }

        let body = paragraphs.join("\n\n");
        match Self::extract_title(&document) {
            Some(title) => Some(format!("{}\n\n{}", title, body)),
            None => Some(body),
        }
    }

    fn extract_title(document: &Html) -> Option<String> {
        let selector = Selector::parse("h1, title").ok()?;
        document
            .select(&selector)
            .next()
            .map(|el: ElementRef<'_>| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl ExtractStrategy for ArticleExtractor {
    fn name(&self) -> &'static str {
        "article"
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
    fn test_picks_densest_container() {
        let html = format!(
            r#"
            <html><head><title>Story Title</title></head><body>
                <div id="sidebar"><p>Short link list.</p></div>
                <div id="story">
                    <p>{body}</p>
                    <p>{body}</p>
                </div>
            </body></html>
            "#,
            body = "A long paragraph of real article prose that keeps going. ".repeat(3)
        );

        let text = ArticleExtractor::extract_from_html(&html).unwrap();
        assert!(text.starts_with("Story Title"));
        assert!(text.contains("real article prose"));
        assert!(!text.contains("Short link list"));
    }

    #[test]
    fn test_sparse_page_is_none() {
        let html = "<div><p>Tiny.</p></div>";
        assert!(ArticleExtractor::extract_from_html(html).is_none());
    }
}
