//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use content::{Extractor, Pipeline, PipelineConfig};
use hf_client::HfClient;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::server::routes::{
    extract_handler, generate_handler, health_handler, info_handler, root_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<Extractor>,
    /// Absent when no model token is configured; /generate returns 503.
    pub pipeline: Option<Arc<Pipeline>>,
    pub hf_client: Option<Arc<HfClient>>,
    pub cache: ResponseCache,
}

impl AppState {
    /// Wire up all dependencies from configuration.
    pub fn from_config(config: Config) -> Self {
        let hf_client = config
            .hf_api_token
            .clone()
            .map(|token| Arc::new(HfClient::new(token)));

        let pipeline = hf_client.clone().map(|client| {
            Arc::new(
                Pipeline::new(client as Arc<dyn content::TextGenerator>).with_config(
                    PipelineConfig {
                        max_chunk_size: config.max_chunk_size,
                        ..PipelineConfig::default()
                    },
                ),
            )
        });

        let cache = ResponseCache::new(config.cache_max_size, config.cache_ttl_seconds);

        Self {
            config: Arc::new(config),
            extractor: Arc::new(Extractor::new()),
            pipeline,
            hf_client,
            cache,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors(&state.config.allowed_origins);

    // Rate limiting on the model-backed POST routes only.
    // 5 requests per second sustained with bursts up to 10 per IP.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(10)
            .key_extractor(SmartIpKeyExtractor) // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let limited = Router::new()
        .route("/extract", post(extract_handler))
        .route("/generate", post(generate_handler))
        .layer(rate_limit_layer);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .merge(limited)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
