//! Call-setup webhooks for the hosted agent runtime.
//!
//! `/pre-call` picks the voice for the call's language and `/agent` hands the
//! runtime the LLM configuration with the session's system prompt.

use axum::{Json, Router, extract::State, routing::{get, post}};
use std::sync::Arc;
use tracing::{info, instrument};
use voice_bridge_core::voice::{AgentConfig, CallConfig, base_language};

use crate::models::{CallRequest, HealthResponse, PreCallResponse};

pub const AGENT_SERVICE_NAME: &str = "cartesia-voice-agent";

/// State for the agent webhooks.
#[derive(Clone, Default)]
pub struct AgentState {
    pub gemini_api_key: Option<String>,
}

#[instrument(skip_all, fields(call_id = ?request.call_id))]
pub async fn pre_call(Json(request): Json<CallRequest>) -> Json<PreCallResponse> {
    let metadata = request.metadata();
    let language_code = metadata.language_code();
    let config = CallConfig::for_language(language_code);

    info!(
        language = %language_code,
        base = %base_language(language_code),
        voice = %config.tts.voice,
        "Configuring voice for call"
    );

    Json(PreCallResponse { config })
}

#[instrument(skip_all, fields(call_id = ?request.call_id))]
pub async fn agent_config(
    State(state): State<Arc<AgentState>>,
    Json(request): Json<CallRequest>,
) -> Json<AgentConfig> {
    let metadata = request.metadata();
    let agent = AgentConfig::from_metadata(&metadata, state.gemini_api_key.clone());

    info!(
        user_id = %metadata.user_id(),
        language = %metadata.language_code(),
        prompt_chars = agent.system_prompt.len(),
        custom_prompt = metadata.system_prompt.is_some(),
        "Creating agent for call"
    );

    Json(agent)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(AGENT_SERVICE_NAME))
}

/// Creates the router served by the `agent` binary.
pub fn create_agent_router(state: Arc<AgentState>) -> Router {
    Router::new()
        .route("/pre-call", post(pre_call))
        .route("/agent", post(agent_config))
        .route("/health", get(health))
        .with_state(state)
}
