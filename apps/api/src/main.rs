mod config;
mod errors;
mod filters;
mod models;
mod pipeline;
mod providers;
mod routes;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::providers::http::JobsHttp;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobRadar API v{}", env!("CARGO_PKG_VERSION"));

    // Shared upstream HTTP client; one timeout budget for all providers
    let http = JobsHttp::new(Duration::from_secs(config.http_timeout_secs));
    info!("HTTP client initialized (timeout: {}s)", config.http_timeout_secs);

    // Company source list: built-in defaults, or an operator-provided file
    let sources = match &config.sources_file {
        Some(path) => {
            let loaded = sources::load_sources(path)?;
            info!("Loaded {} sources from {path}", loaded.len());
            loaded
        }
        None => sources::default_sources(),
    };
    info!("Tracking {} company sources", sources.len());

    let state = AppState {
        http,
        sources: Arc::new(sources),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
