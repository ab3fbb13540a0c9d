//! HTTP surface of the guichet relay: chat API routes, the channel webhook
//! state machine, and server assembly.

pub mod chat;
pub mod error;
pub mod replies;
pub mod server;
pub mod state;
pub mod webhook;

pub use {
    error::ApiError,
    server::{build_router, serve},
    state::{AppState, GatewayState},
};

#[cfg(test)]
mod testutil;
