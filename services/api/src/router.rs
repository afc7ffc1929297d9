//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the session bridge, including the
//! CORS policy and OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, HealthResponse, SessionMetadata, SessionRequest, SessionResponse},
    state::AppState,
};

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::start_session, handlers::health),
    components(
        schemas(SessionRequest, SessionResponse, SessionMetadata, HealthResponse, ErrorResponse)
    ),
    tags(
        (name = "Voice Bridge", description = "Session bootstrap for hosted Cartesia voice agents")
    )
)]
pub struct ApiDoc;

/// Builds the CORS policy from the configured origin allow-list.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the main Axum router for the session bridge.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.config.allowed_origins);

    let api_router = Router::new()
        .route("/api/voice/start-session", post(handlers::start_session))
        .route("/health", get(handlers::health))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
        .layer(cors)
}
