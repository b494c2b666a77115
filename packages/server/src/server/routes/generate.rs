use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use content::{
    generation_key, is_valid_url, GenerationRequest, Language, LengthClass, Persona, Task, Tone,
};

use crate::cache::CacheEntry;
use crate::error::ApiError;
use crate::server::app::AppState;

/// Inputs shorter than this are rejected outright.
const MIN_INPUT_CHARS: usize = 10;

fn default_lang() -> String {
    "auto".to_string()
}

fn default_persona() -> String {
    "generic".to_string()
}

#[derive(Deserialize)]
pub struct GenerateBody {
    /// Raw text, or a URL to extract first.
    pub input: String,
    pub task: String,
    pub tone: String,
    pub length: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_persona")]
    pub persona: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub output: String,
    pub tokens: usize,
    pub cached: bool,
}

/// Generate derivative content from text or a URL.
pub async fn generate_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let pipeline = state.pipeline.clone().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "AI models not available. Please configure HF_API_TOKEN.".to_string(),
        )
    })?;

    let task = Task::parse(&body.task)?;
    let tone = Tone::parse(&body.tone)?;
    let length = LengthClass::parse(&body.length)?;
    let language = Language::parse(&body.lang)?;
    let persona = Persona::parse(&body.persona)?;

    let input = body.input.trim().to_string();
    if input.is_empty() {
        return Err(ApiError::Validation("Input cannot be empty".to_string()));
    }

    // A URL input is best-effort: extraction failure downgrades to a
    // notice so generation still produces something for the caller.
    let text = if is_valid_url(&input) {
        resolve_url_input(&state, &input).await
    } else {
        input
    };

    let char_len = text.chars().count();
    if char_len < MIN_INPUT_CHARS {
        return Err(ApiError::Validation(format!(
            "Input too short. At least {} characters required.",
            MIN_INPUT_CHARS
        )));
    }
    if char_len > state.config.max_input_chars {
        return Err(ApiError::BadRequest(format!(
            "Text too long. Maximum {} characters allowed.",
            state.config.max_input_chars
        )));
    }

    let mut request = GenerationRequest::new(text, task, tone, length, language)
        .with_persona(persona);
    if let Some(max_tokens) = body.max_tokens {
        request = request.with_max_new_tokens(max_tokens);
    }
    if let Some(temperature) = body.temperature {
        request = request.with_temperature(temperature);
    }

    let cache_key = generation_key(&request);
    if let Some(CacheEntry::Generation { output, tokens }) = state.cache.get(&cache_key).await {
        return Ok(Json(GenerateResponse {
            output,
            tokens,
            cached: true,
        }));
    }

    let result = pipeline.generate(&request).await?;
    info!(
        task = %task.as_str(),
        derivation = ?result.derivation,
        tokens = result.estimated_tokens,
        "Generation completed"
    );

    state
        .cache
        .insert(
            cache_key,
            CacheEntry::Generation {
                output: result.output.clone(),
                tokens: result.estimated_tokens,
            },
        )
        .await;

    Ok(Json(GenerateResponse {
        output: result.output,
        tokens: result.estimated_tokens,
        cached: false,
    }))
}

/// Fetch article text for a URL input, degrading to a notice on failure.
async fn resolve_url_input(state: &AppState, url: &str) -> String {
    match state.extractor.extract(url).await {
        Ok(document) => {
            info!(url = %url, strategy = %document.strategy, "URL input extracted");
            document.text
        }
        Err(e) => {
            warn!(url = %url, error = %e, "URL extraction failed, using placeholder input");
            format!(
                "The content at {url} could not be retrieved automatically. \
                 Produce the requested output using the link address as the only \
                 available context, and note that the source was unavailable.\n\n{url}"
            )
        }
    }
}
