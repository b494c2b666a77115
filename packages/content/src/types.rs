//! Request and result types for content generation.
//!
//! Task, tone, length, language, and persona are closed enums rather
//! than free strings, so prompt construction is a total function and
//! invalid combinations are rejected at the edge, before any extraction
//! or model call.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// What kind of derivative content to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Bullet-point summary with a closing paragraph
    Summary,
    /// Long-form video script
    Youtube,
    /// 30-60 second short-form video script
    Shorts,
    /// Set of social media posts
    Social,
    /// SEO package: title, description, keywords, outline
    Seo,
}

impl Task {
    /// All supported tasks, in the order they are advertised.
    pub const ALL: [Task; 5] = [
        Task::Summary,
        Task::Youtube,
        Task::Shorts,
        Task::Social,
        Task::Seo,
    ];

    /// Wire name of the task.
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Summary => "summary",
            Task::Youtube => "youtube",
            Task::Shorts => "shorts",
            Task::Social => "social",
            Task::Seo => "seo",
        }
    }

    /// Parse a wire name, rejecting unknown values.
    pub fn parse(value: &str) -> Result<Self, ContentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| ContentError::Validation {
                reason: format!("unsupported task: {}", value),
            })
    }
}

/// Voice of the generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Casual,
    Energetic,
    Academic,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Neutral, Tone::Casual, Tone::Energetic, Tone::Academic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Casual => "casual",
            Tone::Energetic => "energetic",
            Tone::Academic => "academic",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ContentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| ContentError::Validation {
                reason: format!("unsupported tone: {}", value),
            })
    }
}

/// Target output size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    Medium,
    Long,
}

impl LengthClass {
    pub const ALL: [LengthClass; 3] = [LengthClass::Short, LengthClass::Medium, LengthClass::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthClass::Short => "short",
            LengthClass::Medium => "medium",
            LengthClass::Long => "long",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ContentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == value)
            .ok_or_else(|| ContentError::Validation {
                reason: format!("unsupported length: {}", value),
            })
    }

    /// Token budget for a direct generation call at this length.
    pub fn token_budget(&self) -> u32 {
        match self {
            LengthClass::Short => 256,
            LengthClass::Medium => 400,
            LengthClass::Long => 640,
        }
    }
}

/// Output language.
///
/// `Auto` is resolved to a concrete language by detection before any
/// model call; it never reaches prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Auto,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tr")]
    Turkish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Auto, Language::English, Language::Turkish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::English => "en",
            Language::Turkish => "tr",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ContentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == value)
            .ok_or_else(|| ContentError::Validation {
                reason: format!("unsupported language: {}", value),
            })
    }
}

/// Authorial persona shaping the output's framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Generic,
    Educator,
    Marketer,
    Storyteller,
}

impl Default for Persona {
    fn default() -> Self {
        Persona::Generic
    }
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Generic,
        Persona::Educator,
        Persona::Marketer,
        Persona::Storyteller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Generic => "generic",
            Persona::Educator => "educator",
            Persona::Marketer => "marketer",
            Persona::Storyteller => "storyteller",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ContentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| ContentError::Validation {
                reason: format!("unsupported persona: {}", value),
            })
    }
}

/// A fully validated generation request.
///
/// Immutable once constructed; together with the model's sampling
/// randomness it fully determines the output.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub task: Task,
    pub tone: Tone,
    pub length: LengthClass,
    pub language: Language,
    pub persona: Persona,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationRequest {
    /// Create a request with default numeric parameters.
    pub fn new(
        text: impl Into<String>,
        task: Task,
        tone: Tone,
        length: LengthClass,
        language: Language,
    ) -> Self {
        Self {
            text: text.into(),
            task,
            tone,
            length,
            language,
            persona: Persona::Generic,
            max_new_tokens: length.token_budget(),
            temperature: 0.5,
            top_p: 0.9,
        }
    }

    /// Set the persona.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// Override the token budget.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the nucleus sampling parameter.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }
}

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Derivation {
    /// One model call over the whole input
    Direct,
    /// Per-chunk calls merged by a final aggregation call
    ChunkedAggregated,
}

/// Output of the generation pipeline.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated content
    pub output: String,

    /// Approximate token count (whitespace word count / 4), not an
    /// exact tokenizer count
    pub estimated_tokens: usize,

    /// Whether the direct or chunked path produced this
    pub derivation: Derivation,
}

/// Clean article text successfully extracted from a URL.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    /// Source URL
    pub url: String,

    /// Cleaned text; never holds markup and always meets the minimum
    /// viable length
    pub text: String,

    /// Character length of `text`
    pub len: usize,

    /// Name of the strategy that produced the text
    pub strategy: &'static str,
}

/// Rough token estimate: whitespace-delimited words divided by four.
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count() / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_parse_round_trip() {
        for task in Task::ALL {
            assert_eq!(Task::parse(task.as_str()).unwrap(), task);
        }
        assert!(Task::parse("podcast").is_err());
    }

    #[test]
    fn test_language_wire_names() {
        assert_eq!(Language::parse("auto").unwrap(), Language::Auto);
        assert_eq!(Language::parse("en").unwrap(), Language::English);
        assert_eq!(Language::parse("tr").unwrap(), Language::Turkish);
        assert!(Language::parse("english").is_err());
    }

    #[test]
    fn test_request_defaults_follow_length() {
        let request = GenerationRequest::new(
            "text",
            Task::Summary,
            Tone::Neutral,
            LengthClass::Long,
            Language::English,
        );
        assert_eq!(request.max_new_tokens, LengthClass::Long.token_budget());
        assert_eq!(request.persona, Persona::Generic);
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("one two three four five six seven eight"), 2);
        assert_eq!(estimate_tokens(""), 0);
    }
}
