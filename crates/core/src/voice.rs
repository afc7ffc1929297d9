//! Agent Configuration Adapter
//!
//! At call setup the hosted agent runtime hands over the metadata the bridge
//! attached to the session. This module turns that metadata into the voice
//! configuration (TTS/STT) and the LLM agent configuration for the call.
//! Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_USER_ID: &str = "anonymous";
pub const TTS_MODEL: &str = "sonic-3";
pub const AGENT_MODEL: &str = "gemini/gemini-2.5-flash-preview-09-2025";
pub const FALLBACK_SYSTEM_PROMPT: &str = "You are a helpful sales training assistant. Engage in realistic sales roleplay scenarios.";

/// Cartesia voice ids keyed by primary language subtag.
///
/// These are placeholders until real voices are picked in the Cartesia dashboard.
pub const VOICE_MAPPING: &[(&str, &str)] = &[
    ("en", "a0e99841-438c-4a64-b679-ae501e7d6091"),
    ("es", "b2c1d3e4-438c-4a64-b679-ae501e7d6092"),
    ("fr", "c3d2e1f5-438c-4a64-b679-ae501e7d6093"),
    ("de", "d4e3f2a6-438c-4a64-b679-ae501e7d6094"),
    ("it", "e5f4a3b7-438c-4a64-b679-ae501e7d6095"),
    ("pt", "f6a5b4c8-438c-4a64-b679-ae501e7d6096"),
    ("ja", "a7b6c5d9-438c-4a64-b679-ae501e7d6097"),
    ("zh", "b8c7d6ea-438c-4a64-b679-ae501e7d6098"),
    ("ko", "c9d8e7fb-438c-4a64-b679-ae501e7d6099"),
    ("hi", "dae9f8ac-438c-4a64-b679-ae501e7d609a"),
];

/// Metadata attached to a call by the session bridge.
///
/// Every field is optional; the runtime may forward partial or no metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallMetadata {
    pub language_code: Option<String>,
    pub user_id: Option<String>,
    pub org_id: Option<String>,
    pub playbook: Option<String>,
    pub system_prompt: Option<String>,
}

impl CallMetadata {
    pub fn language_code(&self) -> &str {
        non_empty(&self.language_code).unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn user_id(&self) -> &str {
        non_empty(&self.user_id).unwrap_or(DEFAULT_USER_ID)
    }

    /// The custom prompt for this call, or [`FALLBACK_SYSTEM_PROMPT`].
    pub fn system_prompt(&self) -> &str {
        non_empty(&self.system_prompt).unwrap_or(FALLBACK_SYSTEM_PROMPT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Extracts the primary language subtag, e.g. `"es-MX"` -> `"es"`.
pub fn base_language(language_code: &str) -> String {
    let primary = language_code.trim().split('-').next().unwrap_or_default();
    if primary.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        primary.to_ascii_lowercase()
    }
}

/// Looks up the voice for a primary subtag, falling back to English.
pub fn voice_for(base_language: &str) -> &'static str {
    lookup(base_language)
        .or_else(|| lookup(DEFAULT_LANGUAGE))
        .unwrap_or(VOICE_MAPPING[0].1)
}

fn lookup(language: &str) -> Option<&'static str> {
    VOICE_MAPPING
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, voice)| *voice)
}

/// Returns `true` if the language has a dedicated voice.
pub fn is_supported(language_code: &str) -> bool {
    lookup(&base_language(language_code)).is_some()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsConfig {
    pub voice: String,
    pub model: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttConfig {
    pub language: String,
}

/// Speech configuration applied by the runtime before the call starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    pub tts: TtsConfig,
    pub stt: SttConfig,
}

impl CallConfig {
    /// Builds the speech configuration for a (possibly regional) language code.
    ///
    /// Only the voice falls back to English for unmapped languages; the TTS and
    /// STT language stay on the caller's primary subtag.
    pub fn for_language(language_code: &str) -> Self {
        let language = base_language(language_code);
        let voice = voice_for(&language).to_string();
        Self {
            tts: TtsConfig {
                voice,
                model: TTS_MODEL.to_string(),
                language: language.clone(),
            },
            stt: SttConfig { language },
        }
    }
}

/// LLM agent configuration forwarded to the hosted runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub tools: Vec<String>,
    pub system_prompt: String,
    /// Empty means the agent waits for the user to speak first.
    pub introduction: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AgentConfig {
    pub fn new(system_prompt: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            model: AGENT_MODEL.to_string(),
            api_key,
            tools: vec!["end_call".to_string()],
            system_prompt: system_prompt.into(),
            introduction: String::new(),
            temperature: 0.7,
            // Short turns keep the conversation natural.
            max_tokens: 150,
        }
    }

    /// Builds the agent for a call from its metadata.
    pub fn from_metadata(metadata: &CallMetadata, api_key: Option<String>) -> Self {
        Self::new(metadata.system_prompt(), api_key)
    }
}
