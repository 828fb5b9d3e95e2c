use crate::summarize::SummarizeClient;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream summarization API
    pub summarizer: Arc<SummarizeClient>,
}

impl AppState {
    pub fn new(summarizer: SummarizeClient) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
        }
    }
}
