use crate::{config::Config, state::AppState};
use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;
use tracing::Level;
use voice_bridge_core::{
    error::UpstreamError,
    prompt::{PromptRequest, PromptService},
    token::{AccessTokenRequest, TokenIssuer},
};

mock! {
    pub Prompts {}

    #[async_trait]
    impl PromptService for Prompts {
        async fn generate_prompt(&self, request: &PromptRequest) -> Result<String, UpstreamError>;
    }
}

mock! {
    pub Tokens {}

    #[async_trait]
    impl TokenIssuer for Tokens {
        async fn issue_token(
            &self,
            api_key: &str,
            request: &AccessTokenRequest,
        ) -> Result<String, UpstreamError>;
    }
}

pub fn test_config(cartesia_api_key: Option<&str>) -> Config {
    Config {
        bridge_address: "127.0.0.1:8001".parse().unwrap(),
        agent_address: "127.0.0.1:8000".parse().unwrap(),
        backend_url: "http://backend.test".to_string(),
        cartesia_api_key: cartesia_api_key.map(str::to_string),
        cartesia_api_url: "http://cartesia.test".to_string(),
        cartesia_agent_id: "agent_test".to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        gemini_api_key: Some("gm_test".to_string()),
        log_level: Level::INFO,
    }
}

pub fn test_state(prompts: MockPrompts, tokens: MockTokens, config: Config) -> AppState {
    AppState {
        prompt_service: Arc::new(prompts),
        token_issuer: Arc::new(tokens),
        config: Arc::new(config),
    }
}

/// A prompt upstream failure without a live socket.
pub fn status_error(status: u16, body: &str) -> UpstreamError {
    UpstreamError::Status {
        status: reqwest::StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
    }
}
