use axum::http::HeaderValue;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::Level;
use voice_bridge_core::token::DEFAULT_CARTESIA_API_URL;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
pub const DEFAULT_AGENT_ID: &str = "agent_bVJVHJEoXdAsKXL1hxrFMX";

/// Local development and production frontend/backend origins.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3001",
    "http://localhost:5173",
    "http://127.0.0.1:3001",
    "http://127.0.0.1:5173",
    "https://sublime-nature-production.up.railway.app",
    "https://lingopitch-production.up.railway.app",
];

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address of the session bridge (`HTTP_PORT`).
    pub bridge_address: SocketAddr,
    /// Address of the agent configuration webhooks (`PORT`).
    pub agent_address: SocketAddr,
    pub backend_url: String,
    /// Checked per request so the bridge can start without it.
    pub cartesia_api_key: Option<String>,
    pub cartesia_api_url: String,
    pub cartesia_agent_id: String,
    pub allowed_origins: Vec<String>,
    pub gemini_api_key: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bridge_address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port_var("HTTP_PORT", 8001)?));
        let agent_address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port_var("PORT", 8000)?));

        let backend_url = url_var("TYPESCRIPT_BACKEND_URL", DEFAULT_BACKEND_URL)?;
        let cartesia_api_url = url_var("CARTESIA_API_URL", DEFAULT_CARTESIA_API_URL)?;

        let cartesia_api_key = optional_var("CARTESIA_API_KEY");
        let gemini_api_key = optional_var("GEMINI_API_KEY");

        let cartesia_agent_id =
            optional_var("CARTESIA_AGENT_ID").unwrap_or_else(|| DEFAULT_AGENT_ID.to_string());

        let mut allowed_origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Ok(extra) = std::env::var("ALLOWED_ORIGINS") {
            for origin in extra.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                HeaderValue::from_str(origin).map_err(|e| {
                    ConfigError::InvalidValue("ALLOWED_ORIGINS".to_string(), e.to_string())
                })?;
                if !allowed_origins.iter().any(|o| o == origin) {
                    allowed_origins.push(origin.to_string());
                }
            }
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bridge_address,
            agent_address,
            backend_url,
            cartesia_api_key,
            cartesia_api_url,
            cartesia_agent_id,
            allowed_origins,
            gemini_api_key,
            log_level,
        })
    }

    /// The hosted agent's stream endpoint handed to the frontend.
    pub fn websocket_url(&self) -> String {
        format!("wss://api.cartesia.ai/agents/stream/{}", self.cartesia_agent_id)
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn port_var(name: &str, default: u16) -> Result<u16, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        None => Ok(default),
    }
}

fn url_var(name: &str, default: &str) -> Result<String, ConfigError> {
    let value = optional_var(name).unwrap_or_else(|| default.to_string());
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not an http(s) URL", value),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
