//! Session Bootstrap
//!
//! Resolves the system prompt, mints an access token, and composes the
//! connection details the frontend needs to open the hosted agent stream.
//! The two outbound calls run strictly in sequence and any failure aborts the
//! whole bootstrap; nothing is retried.

use crate::{
    models::{SessionMetadata, SessionRequest, SessionResponse},
    state::AppState,
};
use tracing::info;
use voice_bridge_core::{
    error::UpstreamError,
    prompt::{PromptRequest, PromptService},
    token::AccessTokenRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to fetch prompt: {0}")]
    PromptFetch(#[source] UpstreamError),
    #[error("CARTESIA_API_KEY not configured")]
    MissingCredential,
    #[error("Failed to create access token: {0}")]
    TokenIssue(#[source] UpstreamError),
}

/// Runs the full bootstrap for one session request.
pub async fn bootstrap_session(
    state: &AppState,
    request: SessionRequest,
) -> Result<SessionResponse, BootstrapError> {
    let system_prompt = resolve_prompt(state.prompt_service.as_ref(), &request).await?;

    let api_key = state
        .config
        .cartesia_api_key
        .as_deref()
        .ok_or(BootstrapError::MissingCredential)?;

    let access_token = state
        .token_issuer
        .issue_token(api_key, &AccessTokenRequest::agent())
        .await
        .map_err(BootstrapError::TokenIssue)?;

    let websocket_url = state.config.websocket_url();
    info!(%websocket_url, "Session ready");

    let metadata = SessionMetadata {
        language_code: request.language_code,
        user_id: request.user_id.clone(),
        org_id: request.org_id,
        playbook: request.playbook,
        system_prompt: system_prompt.clone(),
    };

    Ok(SessionResponse {
        agent_id: format!("cartesia_agent_{}", request.user_id),
        websocket_url,
        access_token,
        system_prompt,
        metadata,
    })
}

/// Returns the caller's prompt override, or asks the prompt service for one.
async fn resolve_prompt(
    prompts: &dyn PromptService,
    request: &SessionRequest,
) -> Result<String, BootstrapError> {
    if let Some(prompt) = request.system_prompt.as_ref().filter(|p| !p.is_empty()) {
        info!(chars = prompt.len(), "Using manual prompt override");
        return Ok(prompt.clone());
    }

    info!("Fetching generated prompt from backend");
    let prompt_request = PromptRequest {
        language_code: request.language_code.clone(),
        product_description: request.product_description.clone(),
        org_id: request.org_id.clone(),
    };

    let prompt = prompts
        .generate_prompt(&prompt_request)
        .await
        .map_err(BootstrapError::PromptFetch)?;

    info!(chars = prompt.len(), "Received prompt from backend");
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::DEFAULT_PLAYBOOK,
        test_support::{MockPrompts, MockTokens, status_error, test_config, test_state},
    };

    fn request(system_prompt: Option<&str>) -> SessionRequest {
        SessionRequest {
            language_code: "es-MX".to_string(),
            user_id: "user_42".to_string(),
            org_id: Some("org_7".to_string()),
            playbook: DEFAULT_PLAYBOOK.to_string(),
            product_description: Some("Payroll software".to_string()),
            system_prompt: system_prompt.map(str::to_string),
        }
    }

    fn issuing_tokens() -> MockTokens {
        let mut tokens = MockTokens::new();
        tokens
            .expect_issue_token()
            .times(1)
            .withf(|key, req| key.to_string() == "sk_test" && *req == AccessTokenRequest::agent())
            .returning(|_, _| Ok("tok_abc".to_string()));
        tokens
    }

    #[tokio::test]
    async fn test_override_skips_prompt_service() {
        let mut prompts = MockPrompts::new();
        prompts.expect_generate_prompt().times(0);

        let state = test_state(prompts, issuing_tokens(), test_config(Some("sk_test")));
        let response = bootstrap_session(&state, request(Some("Manual prompt")))
            .await
            .unwrap();

        assert_eq!(response.system_prompt, "Manual prompt");
        assert_eq!(response.access_token, "tok_abc");
    }

    #[tokio::test]
    async fn test_empty_override_falls_through_to_prompt_service() {
        let mut prompts = MockPrompts::new();
        prompts
            .expect_generate_prompt()
            .times(1)
            .returning(|_| Ok("Generated".to_string()));

        let state = test_state(prompts, issuing_tokens(), test_config(Some("sk_test")));
        let response = bootstrap_session(&state, request(Some(""))).await.unwrap();

        assert_eq!(response.system_prompt, "Generated");
    }

    #[tokio::test]
    async fn test_prompt_service_called_once_with_request_context() {
        let mut prompts = MockPrompts::new();
        prompts
            .expect_generate_prompt()
            .times(1)
            .withf(|req| {
                req.language_code == "es-MX"
                    && req.product_description.as_deref() == Some("Payroll software")
                    && req.org_id.as_deref() == Some("org_7")
            })
            .returning(|_| Ok("Eres un comprador exigente.".to_string()));

        let state = test_state(prompts, issuing_tokens(), test_config(Some("sk_test")));
        let response = bootstrap_session(&state, request(None)).await.unwrap();

        assert_eq!(response.agent_id, "cartesia_agent_user_42");
        assert_eq!(
            response.websocket_url,
            "wss://api.cartesia.ai/agents/stream/agent_test"
        );
        assert_eq!(response.system_prompt, "Eres un comprador exigente.");
        assert_eq!(response.metadata.system_prompt, response.system_prompt);
        assert_eq!(response.metadata.language_code, "es-MX");
        assert_eq!(response.metadata.user_id, "user_42");
        assert_eq!(response.metadata.org_id.as_deref(), Some("org_7"));
        assert_eq!(response.metadata.playbook, DEFAULT_PLAYBOOK);
    }

    #[tokio::test]
    async fn test_prompt_failure_skips_token_request() {
        let mut prompts = MockPrompts::new();
        prompts
            .expect_generate_prompt()
            .times(1)
            .returning(|_| Err(status_error(500, "gemini quota exceeded")));
        let mut tokens = MockTokens::new();
        tokens.expect_issue_token().times(0);

        let state = test_state(prompts, tokens, test_config(Some("sk_test")));
        let err = bootstrap_session(&state, request(None)).await.unwrap_err();

        assert!(matches!(err, BootstrapError::PromptFetch(_)));
        assert_eq!(
            err.to_string(),
            "Failed to fetch prompt: upstream returned 500 Internal Server Error: gemini quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_token_request() {
        let mut tokens = MockTokens::new();
        tokens.expect_issue_token().times(0);

        let state = test_state(MockPrompts::new(), tokens, test_config(None));
        let err = bootstrap_session(&state, request(Some("Manual prompt")))
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::MissingCredential));
        assert_eq!(err.to_string(), "CARTESIA_API_KEY not configured");
    }

    #[tokio::test]
    async fn test_token_failure_is_reported() {
        let mut tokens = MockTokens::new();
        tokens
            .expect_issue_token()
            .times(1)
            .returning(|_, _| Err(status_error(401, "invalid api key")));

        let state = test_state(MockPrompts::new(), tokens, test_config(Some("sk_test")));
        let err = bootstrap_session(&state, request(Some("Manual prompt")))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to create access token: upstream returned 401 Unauthorized: invalid api key"
        );
    }
}
