//! API Models
//!
//! Request and response bodies for the bridge and the agent webhooks, with
//! `utoipa` schemas for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use voice_bridge_core::voice::{CallConfig, CallMetadata};

pub const DEFAULT_PLAYBOOK: &str = "B2B SaaS Sales";

fn default_playbook() -> String {
    DEFAULT_PLAYBOOK.to_string()
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct SessionRequest {
    #[schema(example = "es-MX")]
    pub language_code: String,
    #[schema(example = "user_123")]
    pub user_id: String,
    /// Organization id, kept for traceability.
    pub org_id: Option<String>,
    #[serde(default = "default_playbook")]
    #[schema(example = "B2B SaaS Sales")]
    pub playbook: String,
    pub product_description: Option<String>,
    /// Skips prompt generation when set.
    pub system_prompt: Option<String>,
}

/// Metadata attached to the call and read back by the agent at call setup.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct SessionMetadata {
    pub language_code: String,
    pub user_id: String,
    pub org_id: Option<String>,
    pub playbook: String,
    pub system_prompt: String,
}

impl From<SessionMetadata> for CallMetadata {
    fn from(metadata: SessionMetadata) -> Self {
        Self {
            language_code: Some(metadata.language_code),
            user_id: Some(metadata.user_id),
            org_id: metadata.org_id,
            playbook: Some(metadata.playbook),
            system_prompt: Some(metadata.system_prompt),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SessionResponse {
    #[schema(example = "cartesia_agent_user_123")]
    pub agent_id: String,
    #[schema(example = "wss://api.cartesia.ai/agents/stream/agent_bVJVHJEoXdAsKXL1hxrFMX")]
    pub websocket_url: String,
    /// Short-lived token for the hosted agent stream.
    pub access_token: String,
    pub system_prompt: String,
    pub metadata: SessionMetadata,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok(service: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

/// A call-setup request from the hosted agent runtime.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CallRequest {
    pub call_id: Option<String>,
    pub metadata: Option<CallMetadata>,
}

impl CallRequest {
    pub fn metadata(&self) -> CallMetadata {
        self.metadata.clone().unwrap_or_default()
    }
}

#[derive(Serialize, Debug)]
pub struct PreCallResponse {
    pub config: CallConfig,
}
