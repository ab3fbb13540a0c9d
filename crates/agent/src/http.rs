use {
    async_trait::async_trait,
    base64::Engine,
    serde::Serialize,
    tracing::debug,
};

use guichet_config::AgentConfig;

use crate::{Agent, AgentReply, Error, Result};

/// HTTP-backed agent client.
pub struct HttpAgent {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    message: &'a str,
    user_id: &'a str,
    session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio: Option<String>,
}

impl HttpAgent {
    /// Build a client from configuration. Fails when no endpoint is set.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let endpoint = config.url.clone().ok_or(Error::NotConfigured)?;
        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Agent for HttpAgent {
    async fn invoke(
        &self,
        prompt: &str,
        audio: Option<&[u8]>,
        user_id: &str,
        session_id: &str,
    ) -> Result<AgentReply> {
        let request = InvokeRequest {
            message: prompt,
            user_id,
            session_id,
            audio: audio.map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes)),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(user_id, session_id, bytes = body.len(), "agent reply received");
        Ok(AgentReply::new(extract_reply_text(&body)))
    }
}

/// Normalize an agent service response body into reply text.
///
/// Accepts either a JSON object exposing a `content` string field, a bare
/// JSON string, or an already-textual body.
#[must_use]
pub fn extract_reply_text(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(content) = value.get("content").and_then(|v| v.as_str()) {
            return content.to_owned();
        }
        if let Some(text) = value.as_str() {
            return text.to_owned();
        }
    }
    body.to_owned()
}
