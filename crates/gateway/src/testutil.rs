//! Shared helpers for router-level tests.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use {
    async_trait::async_trait,
    axum::{
        body::Body,
        http::{Request, header},
        response::Response,
    },
    http_body_util::BodyExt,
};

use {
    guichet_agent::{Agent, AgentReply, Error as AgentError},
    guichet_config::GuichetConfig,
    guichet_store::{ConversationLog, MemoryConversationStore},
    guichet_whatsapp::Messenger,
};

use crate::state::{AppState, GatewayState};

/// Deterministic agent double recording every invocation.
pub struct ScriptedAgent {
    reply: String,
    fail: bool,
    calls: Mutex<Vec<(String, bool)>>,
}

impl ScriptedAgent {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(prompt, had_audio)` pairs.
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn invoke(
        &self,
        prompt: &str,
        audio: Option<&[u8]>,
        _user_id: &str,
        _session_id: &str,
    ) -> guichet_agent::Result<AgentReply> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((prompt.to_owned(), audio.is_some()));
        if self.fail {
            Err(AgentError::Upstream { status: 500 })
        } else {
            Ok(AgentReply::new(self.reply.clone()))
        }
    }
}

/// State over a memory store with a pre-seeded agent and no Twilio config.
pub fn state_with(store: Arc<MemoryConversationStore>, agent: Arc<dyn Agent>) -> AppState {
    let state = GatewayState::with_parts(
        GuichetConfig::default(),
        ConversationLog::new(store),
        Messenger::from_config(&Default::default()),
    );
    state.set_agent(agent);
    Arc::new(state)
}

/// State with no conversation store configured.
pub fn unconfigured_state() -> AppState {
    let state = GatewayState::with_parts(
        GuichetConfig::default(),
        ConversationLog::disabled(),
        Messenger::from_config(&Default::default()),
    );
    state.set_agent(Arc::new(ScriptedAgent::replying("ok")));
    Arc::new(state)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
