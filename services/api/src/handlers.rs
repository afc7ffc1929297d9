//! Axum Handlers for the Session Bridge
//!
//! Handler doc comments and `utoipa::path` attributes feed the OpenAPI document.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    models::{ErrorResponse, HealthResponse, SessionRequest, SessionResponse},
    session::bootstrap_session,
    state::AppState,
};

pub const BRIDGE_SERVICE_NAME: &str = "cartesia-voice-bridge";

/// Every failure surfaces as a 500 carrying the causing detail.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Internal Server Error: {:?}", self.0);
        let detail = self.0.to_string();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { detail }),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Start a voice session: resolve the prompt, mint an access token, and
/// return the hosted agent's connection details.
#[utoipa::path(
    post,
    path = "/api/voice/start-session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session bootstrapped", body = SessionResponse),
        (status = 500, description = "Upstream or configuration failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %payload.user_id, org_id = ?payload.org_id, language = %payload.language_code))]
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    info!("Starting session");
    let response = bootstrap_session(&state, payload).await?;
    Ok(Json(response))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(BRIDGE_SERVICE_NAME))
}
