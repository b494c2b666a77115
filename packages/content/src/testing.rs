//! Testing utilities including mock implementations.
//!
//! These are useful for testing code that drives the extraction
//! orchestrator or the generation pipeline without making real network
//! or model calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::TextGenerator;
use crate::traits::ExtractStrategy;

/// A mock extraction strategy with a fixed outcome and call counter.
pub struct MockStrategy {
    name: &'static str,
    outcome: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockStrategy {
    /// A strategy that always returns the given text.
    pub fn succeeding(name: &'static str, text: String) -> Self {
        Self {
            name,
            outcome: Ok(text),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A strategy that always fails with the given reason.
    pub fn failing(name: &'static str, reason: &str) -> Self {
        Self {
            name,
            outcome: Err(reason.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the invocation counter, for short-circuit assertions.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ExtractStrategy for MockStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, _url: &str, _timeout: Duration) -> ExtractResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(ExtractError::Http(reason.clone())),
        }
    }
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone)]
pub enum MockCall {
    Summarize { text: String },
    Generate { prompt: String, temperature: f32 },
}

/// A mock text generator with scripted per-call outcomes.
///
/// Summarize outcomes are consumed in order; once the script runs out,
/// every summarize call succeeds with a default text. Generation calls
/// always succeed.
#[derive(Default)]
pub struct MockGenerator {
    summarize_script: Mutex<VecDeque<Result<String, String>>>,
    generate_output: Option<String>,
    calls: Mutex<Vec<MockCall>>,
    summary_delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the output of every generation call.
    pub fn with_generate_output(mut self, output: impl Into<String>) -> Self {
        self.generate_output = Some(output.into());
        self
    }

    /// Queue a successful summarize outcome.
    pub fn with_summary(self, text: impl Into<String>) -> Self {
        self.summarize_script
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
        self
    }

    /// Queue a failing summarize outcome.
    pub fn with_summary_failure(self, reason: impl Into<String>) -> Self {
        self.summarize_script
            .lock()
            .unwrap()
            .push_back(Err(reason.into()));
        self
    }

    /// Hold each summarize call open for the given duration, so
    /// overlapping calls can be observed.
    pub fn with_summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = Some(delay);
        self
    }

    /// Highest number of summarize calls that were in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of summarize calls made.
    pub fn summarize_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Summarize { .. }))
            .count()
    }

    /// Number of generation calls made.
    pub fn generate_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Generate { .. }))
            .count()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn summarize(
        &self,
        text: &str,
        _max_length: Option<u32>,
        _min_length: Option<u32>,
    ) -> Result<String, hf_client::HfError> {
        self.calls.lock().unwrap().push(MockCall::Summarize {
            text: text.to_string(),
        });

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.summary_delay {
            sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self.summarize_script.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(hf_client::HfError::Api(reason)),
            None => Ok("chunk summary".to_string()),
        }
    }

    async fn generate_text(
        &self,
        prompt: &str,
        _max_new_tokens: u32,
        temperature: f32,
        _top_p: f32,
    ) -> Result<String, hf_client::HfError> {
        self.calls.lock().unwrap().push(MockCall::Generate {
            prompt: prompt.to_string(),
            temperature,
        });

        Ok(self
            .generate_output
            .clone()
            .unwrap_or_else(|| "generated output".to_string()))
    }
}
