use std::collections::BTreeMap;

use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    ok: bool,
    timestamp: i64,
    version: String,
    models_available: BTreeMap<String, bool>,
}

/// Health check endpoint
///
/// Probes both hosted models when a token is configured. Always
/// answers 200; a missing token just reports no models available.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let mut models_available = BTreeMap::new();

    if let Some(client) = &state.hf_client {
        let (summarization, generation) = client.test_models().await;
        models_available.insert("summarization".to_string(), summarization);
        models_available.insert("generation".to_string(), generation);
    }

    Json(HealthResponse {
        ok: true,
        timestamp: chrono::Utc::now().timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        models_available,
    })
}
