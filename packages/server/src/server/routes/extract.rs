use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use content::extraction_key;

use crate::cache::CacheEntry;
use crate::error::ApiError;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct ExtractBody {
    pub url: String,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub url: String,
    pub cached: bool,
}

/// Extract readable text from a URL.
///
/// Extraction is the sole operation here, so failure surfaces directly
/// as 400 instead of degrading the way /generate does.
pub async fn extract_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<ExtractBody>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = body.url.trim().to_string();
    if url.is_empty() {
        return Err(ApiError::BadRequest("URL cannot be empty".to_string()));
    }

    let cache_key = extraction_key(&url);
    if let Some(CacheEntry::Extraction { text }) = state.cache.get(&cache_key).await {
        return Ok(Json(ExtractResponse {
            text,
            url,
            cached: true,
        }));
    }

    let document = state.extractor.extract(&url).await?;
    info!(url = %url, strategy = %document.strategy, len = document.len, "Extraction succeeded");

    state
        .cache
        .insert(
            cache_key,
            CacheEntry::Extraction {
                text: document.text.clone(),
            },
        )
        .await;

    Ok(Json(ExtractResponse {
        text: document.text,
        url,
        cached: false,
    }))
}
