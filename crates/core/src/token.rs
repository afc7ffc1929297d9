//! Access Token Issuance
//!
//! Short-lived tokens let the frontend open the hosted agent's WebSocket
//! without ever seeing the platform API key.

use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CARTESIA_API_URL: &str = "https://api.cartesia.ai";
pub const CARTESIA_VERSION: &str = "2025-04-16";
/// Lifetime requested for every access token, in seconds.
pub const TOKEN_TTL_SECS: u64 = 3600;
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Scopes granted to an access token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenGrants {
    pub agent: bool,
}

/// The body sent to the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessTokenRequest {
    pub grants: TokenGrants,
    pub expires_in: u64,
}

impl AccessTokenRequest {
    /// A token allowed to connect to hosted agents, valid for [`TOKEN_TTL_SECS`].
    pub fn agent() -> Self {
        Self {
            grants: TokenGrants { agent: true },
            expires_in: TOKEN_TTL_SECS,
        }
    }
}

// The platform has used both field names across API versions.
#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    token: Option<String>,
}

impl AccessTokenResponse {
    fn into_token(self) -> Option<String> {
        self.access_token
            .filter(|t| !t.is_empty())
            .or(self.token.filter(|t| !t.is_empty()))
    }
}

/// Defines the contract for any service that can mint access tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Exchanges the platform `api_key` for a scoped, short-lived token.
    async fn issue_token(
        &self,
        api_key: &str,
        request: &AccessTokenRequest,
    ) -> Result<String, UpstreamError>;
}

/// A `TokenIssuer` for Cartesia's `POST /access-token` endpoint.
pub struct CartesiaTokenIssuer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl CartesiaTokenIssuer {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/access-token", base_url.trim_end_matches('/')),
            timeout: TOKEN_TIMEOUT,
        }
    }
}

#[async_trait]
impl TokenIssuer for CartesiaTokenIssuer {
    async fn issue_token(
        &self,
        api_key: &str,
        request: &AccessTokenRequest,
    ) -> Result<String, UpstreamError> {
        debug!(endpoint = %self.endpoint, expires_in = request.expires_in, "Requesting access token");

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header("X-API-Key", api_key)
            .header("Cartesia-Version", CARTESIA_VERSION)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let body: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        body.into_token().ok_or_else(|| {
            UpstreamError::MalformedResponse(
                "response has neither `access_token` nor `token`".to_string(),
            )
        })
    }
}
