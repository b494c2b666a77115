//! Shared HTTP fetching for extraction strategies.

use std::time::Duration;

use crate::error::ExtractError;

/// Build the HTTP client shared by all strategies.
///
/// Uses a browser-like User-Agent and Accept headers to avoid trivial
/// bot blocks on article pages.
pub(crate) fn build_client() -> reqwest::Client {
    let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    let mut headers = reqwest::header::HeaderMap::new();
    if let Ok(accept) =
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".parse()
    {
        headers.insert(reqwest::header::ACCEPT, accept);
    }
    if let Ok(lang) = "en-US,en;q=0.5".parse() {
        headers.insert(reqwest::header::ACCEPT_LANGUAGE, lang);
    }

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch raw HTML from a URL, bounded by the strategy timeout.
pub(crate) async fn fetch_html(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, ExtractError> {
    let request = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Http(format!("HTTP {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| ExtractError::Http(e.to_string()))
    };

    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| ExtractError::Timeout {
            url: url.to_string(),
        })?
}
