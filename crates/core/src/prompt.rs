//! System Prompt Generation
//!
//! The bridge does not write prompts itself. It asks the roleplay backend to
//! generate a language-aware system prompt for the hosted agent.

use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Upper bound on a single prompt-generation call.
pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// The body sent to the prompt-generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub language_code: String,
    pub product_description: Option<String>,
    pub org_id: Option<String>,
}

#[derive(Deserialize)]
struct PromptResponse {
    prompt: Option<String>,
}

/// Defines the contract for any service that can produce a system prompt.
#[async_trait]
pub trait PromptService: Send + Sync {
    /// Generates a system prompt for the given language and product context.
    async fn generate_prompt(&self, request: &PromptRequest) -> Result<String, UpstreamError>;
}

/// A `PromptService` backed by the roleplay backend's
/// `POST /api/roleplay/generate-prompt` endpoint.
pub struct BackendPromptService {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl BackendPromptService {
    /// Creates a client for the backend rooted at `base_url`.
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/api/roleplay/generate-prompt",
                base_url.trim_end_matches('/')
            ),
            timeout: PROMPT_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PromptService for BackendPromptService {
    async fn generate_prompt(&self, request: &PromptRequest) -> Result<String, UpstreamError> {
        debug!(endpoint = %self.endpoint, language = %request.language_code, "Requesting generated prompt");

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let body: PromptResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        body.prompt.ok_or_else(|| {
            UpstreamError::MalformedResponse("response has no `prompt` field".to_string())
        })
    }
}
