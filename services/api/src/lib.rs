//! Voice Bridge API Library Crate
//!
//! This library contains the HTTP surface of the voice bridge: configuration,
//! shared state, the session bootstrap, and the routers for both the session
//! bridge and the agent call-setup webhooks. The binaries are thin wrappers
//! around it.

pub mod agent;
pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
