//! HTTP API server for the browser frontend
//!
//! This module provides the REST surface the recorder UI talks to:
//! - POST /api/summarize - Relay a transcript to the summarization API
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
