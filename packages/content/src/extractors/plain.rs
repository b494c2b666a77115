//! Generic markup-stripping extractor.
//!
//! Last resort: drop script/style subtrees and collect every remaining
//! text node in document order. Always produces something on a valid
//! HTML page, at the cost of including page furniture.

use std::time::Duration;

use async_trait::async_trait;
use ego_tree::NodeRef;
use scraper::{Html, Node};

use super::fetch;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::ExtractStrategy;

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "head"];

pub struct PlainTextExtractor {
    client: reqwest::Client,
}

impl PlainTextExtractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn extract_from_html(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let mut out = String::new();
        collect_text(document.tree.root(), &mut out);

        let trimmed = out.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => {
            out.push_str(text);
            out.push(' ');
        }
        Node::Element(element) => {
            if SKIPPED_ELEMENTS.contains(&element.name()) {
                return;
            }
            for child in node.children() {
                collect_text(child, out);
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

#[async_trait]
impl ExtractStrategy for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain"
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> ExtractResult<String> {
        let html = fetch::fetch_html(&self.client, url, timeout).await?;
        Self::extract_from_html(&html).ok_or(ExtractError::NoContent)
    }
}
