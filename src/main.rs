use anyhow::{Context, Result};
use tracing::info;
use voicenote::{create_router, AppState, Config, SummarizeClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/voicenote")?;

    info!("{} v0.1.0", cfg.service.name);
    info!("summarizer upstream: {}", cfg.summarizer.api_url);

    let summarizer = SummarizeClient::new(&cfg.summarizer);
    let state = AppState::new(summarizer);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on {addr}");

    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
