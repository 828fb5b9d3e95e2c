use serde::{Deserialize, Serialize};

/// Request payload for the Cohere v1 summarize endpoint.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest {
    pub text: String,
    pub length: &'static str,
    pub format: &'static str,
    pub model: String,
    pub additional_command: &'static str,
}

/// Success payload from the upstream summarizer.
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    pub summary: Option<String>,
}
