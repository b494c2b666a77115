//! Pure Hugging Face Inference API client
//!
//! A minimal async client for the hosted Inference API with no
//! domain-specific logic. Handles the API's cold-start and rate-limit
//! behavior with an exponential-backoff retry policy, and flattens the
//! inconsistent response envelopes into plain text.
//!
//! # Example
//!
//! ```rust,ignore
//! use hf_client::HfClient;
//!
//! let client = HfClient::from_env()?;
//!
//! // Extractive summarization
//! let summary = client.summarize("long article text", Some(150), Some(30)).await?;
//!
//! // Prompted text generation
//! let text = client
//!     .generate_text("Write a haiku about Rust", 64, 0.7, 0.9)
//!     .await?;
//! ```

pub mod error;
pub mod retry;
pub mod types;

pub use error::{HfError, Result};
pub use retry::RetryPolicy;
pub use types::{Candidate, InferenceRequest, Parameters};

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Default summarization model.
pub const DEFAULT_SUM_MODEL: &str = "facebook/bart-large-cnn";

/// Default text-generation model.
pub const DEFAULT_GEN_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Pure Hugging Face Inference API client.
#[derive(Clone)]
pub struct HfClient {
    http_client: Client,
    api_token: String,
    base_url: String,
    retry: RetryPolicy,
    sum_model: String,
    gen_model: String,
}

impl HfClient {
    /// Create a new client with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            sum_model: DEFAULT_SUM_MODEL.to_string(),
            gen_model: DEFAULT_GEN_MODEL.to_string(),
        }
    }

    /// Create from environment variable `HF_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("HF_API_TOKEN")
            .map_err(|_| HfError::Config("HF_API_TOKEN not set".into()))?;
        Ok(Self::new(api_token))
    }

    /// Set a custom base URL (for proxies or self-hosted endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the summarization model.
    pub fn with_sum_model(mut self, model: impl Into<String>) -> Self {
        self.sum_model = model.into();
        self
    }

    /// Set the text-generation model.
    pub fn with_gen_model(mut self, model: impl Into<String>) -> Self {
        self.gen_model = model.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run inference against a model, retrying transient failures.
    ///
    /// Retries with exponential backoff on 429 (rate limit), on 503
    /// while the model is loading, and on timeouts/network errors.
    /// Any other error status fails immediately.
    pub async fn infer(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, model);
        let start = std::time::Instant::now();

        let mut attempt: u32 = 0;
        loop {
            match self.send(&url, request).await {
                Ok(value) => {
                    debug!(
                        model = %model,
                        duration_ms = start.elapsed().as_millis(),
                        attempts = attempt + 1,
                        "Inference completed"
                    );
                    return Ok(value);
                }
                Err(SendError::Retryable(reason)) => {
                    if !self.retry.should_retry(attempt) {
                        warn!(model = %model, attempts = attempt + 1, "Retries exhausted");
                        return Err(HfError::Api(format!(
                            "retries exhausted after {} attempts: {}",
                            attempt + 1,
                            reason
                        )));
                    }
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        model = %model,
                        attempt = attempt,
                        delay_ms = delay.as_millis(),
                        reason = %reason,
                        "Retrying inference"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(SendError::Fatal(e)) => return Err(e),
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        request: &InferenceRequest,
    ) -> std::result::Result<serde_json::Value, SendError> {
        let response = self
            .http_client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    SendError::Retryable(format!("network error: {}", e))
                } else {
                    SendError::Fatal(HfError::Network(e.to_string()))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| SendError::Fatal(HfError::Parse(e.to_string())));
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                Err(SendError::Retryable("rate limited (429)".into()))
            }
            StatusCode::SERVICE_UNAVAILABLE if body.to_lowercase().contains("loading") => {
                Err(SendError::Retryable("model loading (503)".into()))
            }
            _ => {
                let detail = serde_json::from_str::<types::ApiErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.error)
                    .unwrap_or_else(|| format!("HTTP {}", status));
                warn!(status = %status, error = %detail, "Inference API error");
                Err(SendError::Fatal(HfError::Api(detail)))
            }
        }
    }

    /// Summarize text with the configured summarization model.
    pub async fn summarize(
        &self,
        text: &str,
        max_length: Option<u32>,
        min_length: Option<u32>,
    ) -> Result<String> {
        let mut request = InferenceRequest::new(text);
        if max_length.is_some() || min_length.is_some() {
            request = request.with_parameters(Parameters {
                max_length,
                min_length,
                ..Default::default()
            });
        }

        let response = self.infer(&self.sum_model, &request).await?;
        extract_text(response)
    }

    /// Generate text from a prompt with the configured generation model.
    pub async fn generate_text(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> Result<String> {
        let request = InferenceRequest::new(prompt).with_parameters(Parameters {
            max_new_tokens: Some(max_new_tokens),
            temperature: Some(temperature),
            top_p: Some(top_p),
            do_sample: Some(true),
            return_full_text: Some(false),
            ..Default::default()
        });

        let response = self.infer(&self.gen_model, &request).await?;
        extract_text(response)
    }

    /// Probe both configured models with tiny requests.
    ///
    /// Returns `(summarization_ok, generation_ok)`. Never fails; a probe
    /// error maps to `false` for that model.
    pub async fn test_models(&self) -> (bool, bool) {
        let sum_ok = self
            .summarize("This is a test sentence for model availability.", None, None)
            .await
            .is_ok();
        let gen_ok = self.generate_text("Test prompt", 10, 0.3, 0.9).await.is_ok();
        (sum_ok, gen_ok)
    }
}

enum SendError {
    Retryable(String),
    Fatal(HfError),
}

/// Flatten the known response envelopes into the candidate text.
///
/// Accepts either a list of candidates or a single candidate object,
/// with the text under `generated_text` or `summary_text`.
fn extract_text(response: serde_json::Value) -> Result<String> {
    let candidate: Candidate = match response {
        serde_json::Value::Array(items) => {
            let first = items
                .into_iter()
                .next()
                .ok_or_else(|| HfError::Api("empty candidate list".into()))?;
            serde_json::from_value(first).map_err(|e| HfError::Parse(e.to_string()))?
        }
        other => serde_json::from_value(other).map_err(|e| HfError::Parse(e.to_string()))?,
    };

    let text = candidate
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HfError::Api("no text in response".into()))?;

    Ok(text)
}
