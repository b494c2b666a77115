//! HTTP error mapping.
//!
//! Every error leaves the server as a JSON `{"detail": ...}` body with
//! a status class that distinguishes caller mistakes from upstream
//! trouble. Operator detail (strategy names, upstream statuses) goes to
//! the logs, not the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use content::ContentError;
use hf_client::HfError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request shape or enum value rejected.
    #[error("{0}")]
    Validation(String),

    /// Request was well-formed but cannot be served as asked.
    #[error("{0}")]
    BadRequest(String),

    /// The model backend is not configured or not responding.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The model backend answered with something unusable.
    #[error("{0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation { reason } => ApiError::Validation(reason),
            ContentError::ExtractionFailed { url, attempts } => {
                warn!(url = %url, attempts = attempts.len(), "Extraction failed");
                ApiError::BadRequest(format!(
                    "Could not extract readable content from {url}"
                ))
            }
            ContentError::Model(hf) => hf.into(),
            ContentError::Config(reason) => {
                error!(reason = %reason, "Configuration error");
                ApiError::ServiceUnavailable("AI models not available".to_string())
            }
        }
    }
}

impl From<HfError> for ApiError {
    fn from(err: HfError) -> Self {
        match err {
            HfError::Parse(detail) => {
                error!(detail = %detail, "Unusable model response");
                ApiError::Upstream("AI service returned an unexpected response".to_string())
            }
            other => {
                warn!(error = %other, "Model call failed");
                ApiError::ServiceUnavailable("AI service error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::Validation("bad task".into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_model_error_maps_to_503() {
        let err: ApiError = HfError::Api("rate limited".into()).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_parse_error_maps_to_502() {
        let err: ApiError = HfError::Parse("no text field".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_extraction_failure_message_omits_strategy_detail() {
        let err: ApiError = ContentError::ExtractionFailed {
            url: "https://example.com/a".into(),
            attempts: vec![content::StrategyFailure {
                strategy: "structured",
                reason: "connection refused".into(),
            }],
        }
        .into();
        assert!(!err.to_string().contains("connection refused"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
