use super::messages::{UpstreamRequest, UpstreamResponse};
use crate::config::SummarizerConfig;
use thiserror::Error;
use tracing::debug;

/// Upstream minimum input length, in characters. Shorter text is repeated
/// and truncated to exactly this length before forwarding.
pub const MIN_UPSTREAM_CHARS: usize = 250;

const SUMMARY_LENGTH: &str = "short";
const SUMMARY_FORMAT: &str = "paragraph";
const ADDITIONAL_COMMAND: &str =
    "Summarize the main points in just a few sentences. Be concise and do not add extra information.";
const COHERE_VERSION: &str = "2022-12-06";
const FALLBACK_SUMMARY: &str = "No summary generated.";

#[derive(Debug, Error)]
pub enum SummarizeError {
    /// No API key in the environment; nothing was sent upstream
    #[error("summarization API key not configured")]
    MissingApiKey,

    /// Upstream answered with a non-success status; `details` is the raw
    /// response body
    #[error("upstream summarization request failed: {details}")]
    Upstream { details: String },

    /// Upstream answered 2xx but the body was not the expected payload
    #[error("upstream summarization response unparseable: {details}")]
    Parse { details: String },

    /// The request never completed (connect failure, timeout, ...)
    #[error("summarization request failed: {0}")]
    Transport(String),
}

/// Client for the upstream summarization API
#[derive(Debug, Clone)]
pub struct SummarizeClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl SummarizeClient {
    /// Build a client from config, reading the API key from `COHERE_API_KEY`.
    pub fn new(config: &SummarizerConfig) -> Self {
        let api_key = std::env::var("COHERE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
        }
    }

    /// Replace the key read from the environment (used by tests).
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Summarize `text`, relaying the upstream result verbatim.
    ///
    /// The caller validates that `text` is non-blank; this method handles
    /// padding, forwarding, and response classification.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let api_key = self.api_key.as_ref().ok_or(SummarizeError::MissingApiKey)?;

        let padded = pad_to_minimum(text, MIN_UPSTREAM_CHARS);
        debug!(
            "forwarding {} chars to {}",
            padded.chars().count(),
            self.api_url
        );

        let request = UpstreamRequest {
            text: padded,
            length: SUMMARY_LENGTH,
            format: SUMMARY_FORMAT,
            model: self.model.clone(),
            additional_command: ADDITIONAL_COMMAND,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("Cohere-Version", COHERE_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;
        debug!("upstream responded {status}");

        if !status.is_success() {
            return Err(SummarizeError::Upstream { details: body });
        }

        let parsed: UpstreamResponse =
            serde_json::from_str(&body).map_err(|_| SummarizeError::Parse { details: body })?;

        Ok(parsed
            .summary
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()))
    }
}

/// Repeat `text` until it reaches `minimum` characters, then truncate to
/// exactly `minimum`. Text already at or above the minimum passes through
/// unchanged.
pub fn pad_to_minimum(text: &str, minimum: usize) -> String {
    let len = text.chars().count();
    if len == 0 || len >= minimum {
        return text.to_string();
    }
    let repeats = (minimum + len - 1) / len;
    text.repeat(repeats).chars().take(minimum).collect()
}
