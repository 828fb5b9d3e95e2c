use super::state::AppState;
use crate::summarize::SummarizeError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Transcript text to summarize. A missing field is treated the same as
    /// an empty one.
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/summarize
/// Validate the transcript and relay it to the summarization API
pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text provided".to_string(),
                details: None,
            }),
        )
            .into_response();
    }

    info!("summarizing {} chars of transcript", req.text.chars().count());

    match state.summarizer.summarize(&req.text).await {
        Ok(summary) => (StatusCode::OK, Json(SummarizeResponse { summary })).into_response(),
        Err(e) => {
            error!("summarization failed: {e}");
            let (error, details) = match e {
                SummarizeError::MissingApiKey => {
                    ("Cohere API key not configured".to_string(), None)
                }
                SummarizeError::Upstream { details } => {
                    ("Failed to summarize text".to_string(), Some(details))
                }
                SummarizeError::Parse { details } => {
                    ("Failed to parse Cohere response".to_string(), Some(details))
                }
                SummarizeError::Transport(message) => (
                    "Failed to generate summary. Please try again.".to_string(),
                    Some(message),
                ),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error, details }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
