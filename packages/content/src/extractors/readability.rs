//! Readability-style extractor.
//!
//! Scores every candidate node on text mass, link density, and class/id
//! hints, then returns the text of the top-scoring node. More tolerant
//! than the structural strategies but can drag in some page furniture,
//! so it runs after them.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use super::fetch;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::ExtractStrategy;

const POSITIVE_HINTS: [&str; 6] = ["article", "content", "post", "story", "body", "entry"];
const NEGATIVE_HINTS: [&str; 7] = [
    "sidebar", "comment", "footer", "header", "menu", "nav", "promo",
];

pub struct ReadabilityExtractor {
    client: reqwest::Client,
}

impl ReadabilityExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn extract_from_html(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let candidate_selector = Selector::parse("div, section, article, main").ok()?;

        let mut best: Option<(i64, String)> = None;

        for candidate in document.select(&candidate_selector) {
            let text = candidate.text().collect::<Vec<_>>().join(" ");
            let score = Self::score(&candidate, &text);

            if score > best.as_ref().map(|(s, _)| *s).unwrap_or(0) {
                best = Some((score, text));
            }
        }

        best.map(|(_, text)| text)
    }

    fn score(candidate: &ElementRef<'_>, text: &str) -> i64 {
        let text_len = text.split_whitespace().map(str::len).sum::<usize>() as i64;

        // Link-heavy nodes are navigation, not prose.
        let link_selector = Selector::parse("a").expect("static selector");
        let link_len: i64 = candidate
            .select(&link_selector)
            .map(|a| a.text().collect::<String>().len() as i64)
            .sum();

        let mut score = text_len - link_len * 3;

        let hints = format!(
            "{} {}",
            candidate.value().attr("class").unwrap_or(""),
            candidate.value().attr("id").unwrap_or("")
        )
        .to_lowercase();

        if POSITIVE_HINTS.iter().any(|h| hints.contains(h)) {
            score += 200;
        }
        if NEGATIVE_HINTS.iter().any(|h| hints.contains(h)) {
            score -= 400;
        }

        score
    }
}

#[async_trait]
impl ExtractStrategy for ReadabilityExtractor {
    fn name(&self) -> &'static str {
        "readability"
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
    fn test_link_lists_lose_to_prose() {
        let prose = "Sentences of ordinary article prose win the score. ".repeat(5);
        let html = format!(
            r#"
            <html><body>
                <div id="nav-menu">
                    <a href="/a">First link</a><a href="/b">Second link</a>
                    <a href="/c">Third link</a><a href="/d">Fourth link</a>
                </div>
                <div class="article-body"><p>{prose}</p></div>
            </body></html>
            "#
        );

        let text = ReadabilityExtractor::extract_from_html(&html).unwrap();
        assert!(text.contains("ordinary article prose"));
        assert!(!text.contains("First link"));
    }

    #[test]
    fn test_negative_hints_penalize() {
        let filler = "word ".repeat(40);
        let html = format!(
            r#"
            <html><body>
                <div class="sidebar">{filler}</div>
                <div class="entry">{filler}</div>
            </body></html>
            "#
        );

        // Same text mass; the class hints decide.
        let document = Html::parse_document(&html);
        let selector = Selector::parse("div").unwrap();
        let nodes: Vec<_> = document.select(&selector).collect();
        let sidebar_text = nodes[0].text().collect::<Vec<_>>().join(" ");
        let entry_text = nodes[1].text().collect::<Vec<_>>().join(" ");

        assert!(
            ReadabilityExtractor::score(&nodes[1], &entry_text)
                > ReadabilityExtractor::score(&nodes[0], &sidebar_text)
        );
    }
}
