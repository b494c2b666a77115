//! Hugging Face Inference API request and response types.

use serde::{Deserialize, Serialize};

/// Inference request body.
///
/// The same shape serves both summarization models (`max_length` /
/// `min_length`) and text-generation models (`max_new_tokens`,
/// `temperature`, `top_p`); unset fields are omitted on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    /// Input text or prompt
    pub inputs: String,

    /// Model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl InferenceRequest {
    /// Create a request with bare inputs and no parameters.
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: None,
        }
    }

    /// Set the parameters block.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Model parameters for an inference request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Parameters {
    /// Maximum new tokens to generate (generation models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Whether to sample (as opposed to greedy decoding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,

    /// Return the prompt along with the completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_text: Option<bool>,

    /// Maximum summary length (summarization models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Minimum summary length (summarization models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
}

/// A single candidate in an inference response.
///
/// The API is inconsistent about field names across model families,
/// so both are optional and flattened by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Text field used by generation models
    #[serde(default)]
    pub generated_text: Option<String>,

    /// Text field used by summarization models
    #[serde(default)]
    pub summary_text: Option<String>,
}

impl Candidate {
    /// The candidate's text, whichever field carried it.
    pub fn text(&self) -> Option<&str> {
        self.generated_text
            .as_deref()
            .or(self.summary_text.as_deref())
    }
}

/// Error body returned by the API on 4xx/5xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,

    /// Seconds until a cold model finishes loading (present on 503)
    #[serde(default)]
    pub estimated_time: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_parameters() {
        let request = InferenceRequest::new("hello");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"inputs":"hello"}"#);
    }

    #[test]
    fn test_candidate_text_prefers_generated() {
        let candidate = Candidate {
            generated_text: Some("gen".into()),
            summary_text: Some("sum".into()),
        };
        assert_eq!(candidate.text(), Some("gen"));

        let summary_only = Candidate {
            generated_text: None,
            summary_text: Some("sum".into()),
        };
        assert_eq!(summary_only.text(), Some("sum"));
    }
}
