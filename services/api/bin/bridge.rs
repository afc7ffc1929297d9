//! Main Entrypoint for the Voice Bridge Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing the prompt and token clients.
//! 3. Constructing the Axum router.
//! 4. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use voice_bridge_api::{config::Config, router::create_router, state::AppState};
use voice_bridge_core::{prompt::BackendPromptService, token::CartesiaTokenIssuer};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    if config.cartesia_api_key.is_none() {
        warn!("CARTESIA_API_KEY is not set; session requests will fail until it is configured");
    }

    // --- 3. Initialize Shared Services ---
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let app_state = Arc::new(AppState {
        prompt_service: Arc::new(BackendPromptService::new(http.clone(), &config.backend_url)),
        token_issuer: Arc::new(CartesiaTokenIssuer::new(http, &config.cartesia_api_url)),
        config: Arc::new(config.clone()),
    });

    // --- 4. Create Router ---
    let app = create_router(app_state);

    // --- 5. Start Server ---
    info!(
        backend_url = %config.backend_url,
        websocket_url = %config.websocket_url(),
        allowed_origins = config.allowed_origins.len(),
        bind_address = %config.bridge_address,
        "Service configured. Starting voice bridge..."
    );
    let listener = tokio::net::TcpListener::bind(config.bridge_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bridge_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
