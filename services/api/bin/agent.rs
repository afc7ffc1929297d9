//! Entrypoint for the agent call-setup webhooks.
//!
//! Serves the voice and LLM configuration the hosted agent runtime requests
//! when a call starts.

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use voice_bridge_api::{
    agent::{AgentState, create_agent_router},
    config::Config,
};
use voice_bridge_core::voice::{AGENT_MODEL, VOICE_MAPPING};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; agents will be configured without an LLM key");
    }

    let state = Arc::new(AgentState {
        gemini_api_key: config.gemini_api_key.clone(),
    });
    let app = create_agent_router(state);

    let languages: Vec<&str> = VOICE_MAPPING.iter().map(|(code, _)| *code).collect();
    info!(
        model = AGENT_MODEL,
        languages = %languages.join(", "),
        bind_address = %config.agent_address,
        "Starting voice agent webhooks..."
    );

    let listener = tokio::net::TcpListener::bind(config.agent_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.agent_address))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
