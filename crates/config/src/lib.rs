//! Environment-level configuration for the guichet relay.

pub mod loader;
pub mod schema;

pub use {
    loader::from_env,
    schema::{AgentConfig, GuichetConfig, ServerConfig, StoreConfig, TwilioConfig},
};
