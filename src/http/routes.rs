use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Summarization proxy
        .route("/api/summarize", post(handlers::summarize))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        // The recorder UI may be served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
