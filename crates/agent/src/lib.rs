//! Boundary to the external conversational agent.
//!
//! The agent's reasoning and knowledge retrieval live elsewhere; this crate
//! only defines the request/response contract and an HTTP-backed client.

pub mod error;
pub mod http;

pub use {
    error::{Error, Result},
    http::{HttpAgent, extract_reply_text},
};

use async_trait::async_trait;

/// The agent's answer for one turn.
///
/// A tagged type with a single text accessor; whatever shape the upstream
/// service responds with is normalized before this is constructed.
#[derive(Debug, Clone)]
pub struct AgentReply {
    text: String,
}

impl AgentReply {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// External conversational agent.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run one turn. `audio` carries raw media bytes for audio-originated
    /// turns; `prompt` is the user's text or a fixed media instruction.
    async fn invoke(
        &self,
        prompt: &str,
        audio: Option<&[u8]>,
        user_id: &str,
        session_id: &str,
    ) -> Result<AgentReply>;
}
