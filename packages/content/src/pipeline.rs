//! Content generation pipeline.
//!
//! Short input goes to the model in one direct call. Oversized input is
//! chunked, each chunk is reduced by a fast extractive-summarization
//! call (falling back to a short generation call if that fails), and a
//! final aggregation call merges the partials under the original task,
//! tone, and length parameters. Chunk calls run concurrently behind a
//! small semaphore so a long document cannot flood the model host, and
//! partials are reassembled by chunk ordinal regardless of completion
//! order. The aggregation call starts only after every chunk partial
//! has resolved.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::chunk::{split_text, TextChunk};
use crate::error::{ContentError, Result};
use crate::lang::resolve_language;
use crate::prompts::build_prompt;
use crate::types::{
    estimate_tokens, Derivation, GenerationRequest, GenerationResult, LengthClass, Task,
};

/// LLM capability seam consumed by the pipeline.
///
/// Implemented for [`hf_client::HfClient`]; tests substitute
/// [`crate::testing::MockGenerator`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Fast extractive summarization of raw text.
    async fn summarize(
        &self,
        text: &str,
        max_length: Option<u32>,
        min_length: Option<u32>,
    ) -> std::result::Result<String, hf_client::HfError>;

    /// Prompted text generation.
    async fn generate_text(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> std::result::Result<String, hf_client::HfError>;
}

// Inherent methods win path resolution, so these calls do not recurse.
#[async_trait]
impl TextGenerator for hf_client::HfClient {
    async fn summarize(
        &self,
        text: &str,
        max_length: Option<u32>,
        min_length: Option<u32>,
    ) -> std::result::Result<String, hf_client::HfError> {
        hf_client::HfClient::summarize(self, text, max_length, min_length).await
    }

    async fn generate_text(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> std::result::Result<String, hf_client::HfError> {
        hf_client::HfClient::generate_text(self, prompt, max_new_tokens, temperature, top_p).await
    }
}

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Inputs longer than this (in characters) take the chunked path.
    pub max_chunk_size: usize,

    /// Maximum simultaneous per-chunk model calls.
    pub max_concurrency: usize,

    /// Length class for the per-chunk fallback generation call.
    ///
    /// The fallback deliberately targets a shorter output than the
    /// direct path; tunable rather than hardcoded.
    pub fallback_length: LengthClass,

    /// Token budget for the per-chunk fallback generation call.
    pub fallback_max_tokens: u32,

    /// Sampling temperature for the per-chunk fallback generation call.
    /// Lower than the direct path to keep partials faithful to the
    /// chunk text.
    pub fallback_temperature: f32,

    /// Summary length bounds for the fast per-chunk call.
    pub chunk_summary_max_len: u32,
    pub chunk_summary_min_len: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 4000,
            max_concurrency: 5,
            fallback_length: LengthClass::Short,
            fallback_max_tokens: 200,
            fallback_temperature: 0.3,
            chunk_summary_max_len: 150,
            chunk_summary_min_len: 30,
        }
    }
}

/// Drives direct and chunked generation against a [`TextGenerator`].
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate derivative content for a validated request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        // Resolve `auto` once, before any model call.
        let language = resolve_language(request.language, &request.text);

        if request.text.chars().count() <= self.config.max_chunk_size {
            return self.generate_direct(request, language).await;
        }
        self.generate_chunked(request, language).await
    }

    async fn generate_direct(
        &self,
        request: &GenerationRequest,
        language: crate::types::Language,
    ) -> Result<GenerationResult> {
        let prompt = build_prompt(
            request.task,
            request.tone,
            request.length,
            language,
            request.persona,
            &request.text,
        );

        let output = self
            .generator
            .generate_text(
                &prompt,
                request.max_new_tokens,
                request.temperature,
                request.top_p,
            )
            .await?;

        debug!(task = %request.task.as_str(), "Direct generation completed");
        Ok(GenerationResult {
            output,
            estimated_tokens: estimate_tokens(&prompt),
            derivation: Derivation::Direct,
        })
    }

    async fn generate_chunked(
        &self,
        request: &GenerationRequest,
        language: crate::types::Language,
    ) -> Result<GenerationResult> {
        let chunks = split_text(&request.text, self.config.max_chunk_size);
        info!(
            task = %request.task.as_str(),
            input_len = request.text.len(),
            chunks = chunks.len(),
            "Input over chunk limit, taking chunked path"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));

        // join_all keeps the future order, so partials come back in
        // chunk-ordinal order no matter which call finishes first.
        let chunk_futures = chunks.iter().map(|chunk| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|_| ContentError::Config("chunk semaphore closed".into()))?;
                self.process_chunk(chunk, request, language).await
            }
        });

        let outcomes = futures::future::join_all(chunk_futures).await;

        let mut partials = Vec::with_capacity(outcomes.len());
        let mut total_tokens = 0usize;
        for outcome in outcomes {
            let (partial, tokens) = outcome?;
            partials.push(partial);
            total_tokens += tokens;
        }

        // Aggregation barrier: every chunk partial has resolved.
        let combined = partials.join("\n\n");
        let final_prompt = build_prompt(
            request.task,
            request.tone,
            request.length,
            language,
            request.persona,
            &combined,
        );

        let output = self
            .generator
            .generate_text(
                &final_prompt,
                request.max_new_tokens,
                request.temperature,
                request.top_p,
            )
            .await?;

        info!(task = %request.task.as_str(), chunks = partials.len(), "Aggregation completed");
        Ok(GenerationResult {
            output,
            estimated_tokens: total_tokens,
            derivation: Derivation::ChunkedAggregated,
        })
    }

    /// Reduce one chunk to a partial result.
    ///
    /// Two tiers: a fast extractive summarization call, then a
    /// general-purpose generation call with a shorter target length.
    /// Only when both fail does the chunk abort the pipeline.
    async fn process_chunk(
        &self,
        chunk: &TextChunk,
        request: &GenerationRequest,
        language: crate::types::Language,
    ) -> Result<(String, usize)> {
        match self
            .generator
            .summarize(
                &chunk.text,
                Some(self.config.chunk_summary_max_len),
                Some(self.config.chunk_summary_min_len),
            )
            .await
        {
            Ok(summary) => Ok((summary, estimate_tokens(&chunk.text))),
            Err(e) => {
                warn!(
                    chunk = chunk.index,
                    error = %e,
                    "Chunk summarization failed, falling back to generation"
                );

                let prompt = build_prompt(
                    Task::Summary,
                    request.tone,
                    self.config.fallback_length,
                    language,
                    request.persona,
                    &chunk.text,
                );
                let partial = self
                    .generator
                    .generate_text(
                        &prompt,
                        self.config.fallback_max_tokens,
                        self.config.fallback_temperature,
                        request.top_p,
                    )
                    .await?;
                Ok((partial, estimate_tokens(&prompt)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCall, MockGenerator};
    use crate::types::{Language, LengthClass, Persona, Task, Tone};

    fn request_with_text(text: String) -> GenerationRequest {
        GenerationRequest::new(
            text,
            Task::Summary,
            Tone::Neutral,
            LengthClass::Medium,
            Language::English,
        )
        .with_persona(Persona::Generic)
    }

    fn pipeline_with(generator: Arc<MockGenerator>, max_chunk_size: usize) -> Pipeline {
        Pipeline::new(generator).with_config(PipelineConfig {
            max_chunk_size,
            ..PipelineConfig::default()
        })
    }

    #[tokio::test]
    async fn test_input_at_threshold_takes_direct_path() {
        let generator = Arc::new(MockGenerator::new().with_generate_output("direct result"));
        let pipeline = pipeline_with(generator.clone(), 100);

        let text = "e".repeat(100);
        let result = pipeline.generate(&request_with_text(text)).await.unwrap();

        assert_eq!(result.derivation, Derivation::Direct);
        assert_eq!(result.output, "direct result");
        assert_eq!(generator.summarize_calls(), 0);
        assert_eq!(generator.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_one_char_over_threshold_takes_chunked_path() {
        let generator = Arc::new(MockGenerator::new());
        let pipeline = pipeline_with(generator.clone(), 100);

        let text = "f".repeat(101);
        let result = pipeline.generate(&request_with_text(text)).await.unwrap();

        assert_eq!(result.derivation, Derivation::ChunkedAggregated);
        // ceil(101/100) = 2 chunk calls plus exactly one aggregation call.
        assert_eq!(generator.summarize_calls(), 2);
        assert_eq!(generator.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_nine_thousand_chars_four_model_calls() {
        let generator = Arc::new(MockGenerator::new().with_generate_output("final"));
        let pipeline = pipeline_with(generator.clone(), 4000);

        // Nine 1000-char paragraphs pack into three chunks of 4000 or less.
        let paragraphs: Vec<String> = (0..9).map(|_| "g".repeat(1000)).collect();
        let text = paragraphs.join("\n\n");
        assert_eq!(text.len(), 9016);

        let result = pipeline.generate(&request_with_text(text)).await.unwrap();

        assert_eq!(result.derivation, Derivation::ChunkedAggregated);
        assert_eq!(generator.summarize_calls(), 3);
        assert_eq!(generator.generate_calls(), 1);
        assert_eq!(result.output, "final");
    }

    #[tokio::test]
    async fn test_partials_ordered_by_chunk_ordinal() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_summary("first partial")
                .with_summary("second partial")
                .with_summary("third partial"),
        );
        let pipeline = pipeline_with(generator.clone(), 4000);

        let paragraphs: Vec<String> = (0..9).map(|_| "h".repeat(1000)).collect();
        let text = paragraphs.join("\n\n");
        pipeline.generate(&request_with_text(text)).await.unwrap();

        // The aggregation prompt must contain the partials in order.
        let calls = generator.calls();
        let aggregation_prompt = calls
            .iter()
            .find_map(|c| match c {
                MockCall::Generate { prompt, .. } => Some(prompt.clone()),
                _ => None,
            })
            .unwrap();
        assert!(aggregation_prompt.contains("first partial\n\nsecond partial\n\nthird partial"));
    }

    #[tokio::test]
    async fn test_chunk_fan_out_respects_concurrency_limit() {
        let generator = Arc::new(
            MockGenerator::new().with_summary_delay(std::time::Duration::from_millis(10)),
        );
        let pipeline = Pipeline::new(generator.clone()).with_config(PipelineConfig {
            max_chunk_size: 100,
            max_concurrency: 2,
            ..PipelineConfig::default()
        });

        // Twelve paragraphs, each its own chunk, all eager to run.
        let paragraphs: Vec<String> = (0..12).map(|_| "j".repeat(80)).collect();
        let text = paragraphs.join("\n\n");
        pipeline.generate(&request_with_text(text)).await.unwrap();

        assert_eq!(generator.summarize_calls(), 12);
        assert!(
            generator.peak_in_flight() <= 2,
            "observed {} simultaneous chunk calls",
            generator.peak_in_flight()
        );
    }

    #[tokio::test]
    async fn test_fallback_uses_configured_temperature() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_summary_failure("cold model")
                .with_summary("fine")
                .with_summary("fine"),
        );
        let pipeline = Pipeline::new(generator.clone()).with_config(PipelineConfig {
            max_chunk_size: 4000,
            fallback_temperature: 0.15,
            ..PipelineConfig::default()
        });

        let paragraphs: Vec<String> = (0..9).map(|_| "k".repeat(1000)).collect();
        let text = paragraphs.join("\n\n");
        pipeline.generate(&request_with_text(text)).await.unwrap();

        let temperatures: Vec<f32> = generator
            .calls()
            .iter()
            .filter_map(|c| match c {
                MockCall::Generate { temperature, .. } => Some(*temperature),
                _ => None,
            })
            .collect();
        // One fallback call at the configured temperature plus the
        // aggregation call at the request's own temperature.
        assert!(temperatures.contains(&0.15));
        assert!(temperatures.contains(&0.5));
    }

    #[tokio::test]
    async fn test_chunk_fallback_recovers_single_failure() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_summary("partial one")
                .with_summary_failure("model exploded")
                .with_summary("partial three")
                .with_generate_output("fallback or final"),
        );
        let pipeline = pipeline_with(generator.clone(), 4000);

        let paragraphs: Vec<String> = (0..9).map(|_| "i".repeat(1000)).collect();
        let text = paragraphs.join("\n\n");
        let result = pipeline.generate(&request_with_text(text)).await.unwrap();

        assert_eq!(result.derivation, Derivation::ChunkedAggregated);
        assert_eq!(generator.summarize_calls(), 3);
        // One fallback generation for the failed chunk plus one aggregation.
        assert_eq!(generator.generate_calls(), 2);
    }

    #[tokio::test]
    async fn test_auto_language_resolved_before_prompting() {
        let generator = Arc::new(MockGenerator::new());
        let pipeline = pipeline_with(generator.clone(), 10_000);

        let request = GenerationRequest::new(
            "The weather is lovely today and the conference went well overall.",
            Task::Summary,
            Tone::Neutral,
            LengthClass::Short,
            Language::Auto,
        );
        pipeline.generate(&request).await.unwrap();

        let calls = generator.calls();
        let prompt = calls
            .iter()
            .find_map(|c| match c {
                MockCall::Generate { prompt, .. } => Some(prompt.clone()),
                _ => None,
            })
            .unwrap();
        // English template, not an unresolved `auto` branch.
        assert!(prompt.contains("Source text:"));
    }
}
