use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use content::{Language, LengthClass, Persona, Task, Tone};

use crate::server::app::AppState;

/// API information and available features
pub async fn info_handler(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "features": {
            "text_extraction": true,
            "content_generation": state.pipeline.is_some(),
            "caching": true,
            "rate_limiting": true,
        },
        "extraction_strategies": state.extractor.strategy_names(),
        "supported_tasks": Task::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "supported_tones": Tone::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "supported_lengths": LengthClass::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        "supported_languages": Language::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        "supported_personas": Persona::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        "limits": {
            "max_input_chars": state.config.max_input_chars,
            "max_chunk_size": state.config.max_chunk_size,
        },
    }))
}

/// Root endpoint with API information
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Recast API",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
        "info": "/info",
    }))
}
