//! Core building blocks of the voice bridge.
//!
//! The outbound service seams (`PromptService`, `TokenIssuer`) are defined
//! here as async traits so the HTTP layer can be tested against stubs, along
//! with the pure voice/agent configuration logic used at call setup.

pub mod error;
pub mod prompt;
pub mod token;
pub mod voice;

#[cfg(test)]
pub(crate) mod test_support;
