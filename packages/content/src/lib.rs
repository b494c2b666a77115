//! Core content transformation library.
//!
//! Turns raw text or a fetched web page into derivative content
//! (summaries, video scripts, social posts, SEO packages) through a
//! hosted-model client. Three concerns live here:
//!
//! - extraction: ordered fallback strategies that pull readable text
//!   out of arbitrary HTML
//! - chunking: a recursive splitter that keeps model inputs under a
//!   size limit while respecting paragraph and sentence boundaries
//! - generation: direct or chunk-and-aggregate prompting with language
//!   detection and deterministic cache keys

pub mod chunk;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod key;
pub mod lang;
pub mod pipeline;
pub mod prompts;
pub mod testing;
pub mod traits;
pub mod types;

pub use chunk::{split_text, TextChunk};
pub use error::{ContentError, ExtractError, Result, StrategyFailure};
pub use extract::{clean_text, is_valid_url, Extractor};
pub use key::{extraction_key, generation_key};
pub use lang::resolve_language;
pub use pipeline::{Pipeline, PipelineConfig, TextGenerator};
pub use prompts::build_prompt;
pub use traits::ExtractStrategy;
pub use types::{
    estimate_tokens, Derivation, ExtractedDocument, GenerationRequest, GenerationResult, Language,
    LengthClass, Persona, Task, Tone,
};
