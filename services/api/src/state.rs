//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the outbound
//! service clients and configuration shared by all handlers.

use crate::config::Config;
use std::sync::Arc;
use voice_bridge_core::{prompt::PromptService, token::TokenIssuer};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub prompt_service: Arc<dyn PromptService>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub config: Arc<Config>,
}
