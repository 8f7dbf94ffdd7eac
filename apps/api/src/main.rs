mod composer;
mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::composer::{PromptComposer, Templates};
use crate::config::Config;
use crate::llm_client::ChatCompletionsClient;
use crate::pipeline::session::SessionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Load prompt templates once; they stay immutable for the process lifetime
    let templates = Templates::load(&config.prompts_dir)?;
    let composer = Arc::new(PromptComposer::new(templates, config.temperatures));

    // Initialize generation client
    let generator = ChatCompletionsClient::new(&config.llm)?;
    info!(
        "Generation client initialized (model: {}, timeout: {:?})",
        generator.model(),
        config.llm.timeout
    );
    if config.llm.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; generation requests will fail until it is configured");
    }

    let state = AppState {
        config: config.clone(),
        composer,
        generator: Arc::new(generator),
        sessions: SessionStore::new(config.session_ttl),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
