mod analysis;
mod config;
mod errors;
mod extraction;
mod matching;
mod models;
mod report;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::report::{FileSink, LogSink, ReportSink, WebhookSink};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Tokenization: strict_alpha_tokens={}, upload limit {} bytes",
        config.normalize.strict_alpha_tokens, config.max_upload_bytes
    );

    let sinks = build_sinks(&config)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(DocumentExtractor::new()),
        sinks: Arc::new(sinks),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Log sink always; file and webhook sinks when configured.
fn build_sinks(config: &Config) -> Result<Vec<Arc<dyn ReportSink>>> {
    let mut sinks: Vec<Arc<dyn ReportSink>> = vec![Arc::new(LogSink)];

    if let Some(dir) = &config.report_export_dir {
        info!("Report export directory: {}", dir.display());
        sinks.push(Arc::new(FileSink::new(dir.clone())));
    }

    if let Some(url) = &config.report_webhook_url {
        let webhook = WebhookSink::new(url.clone()).context("Failed to build webhook client")?;
        info!("Report webhook enabled: {url}");
        sinks.push(Arc::new(webhook));
    }

    Ok(sinks)
}
