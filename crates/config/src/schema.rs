use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuichetConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub twilio: TwilioConfig,
    pub agent: AgentConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

/// Conversation store settings. The URI is the configuration gate: without it
/// the store is treated as absent (reads return 503, writes become no-ops).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: "guichet_support".into(),
            collection: "chat_messages".into(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.uri.is_some() && !self.database.is_empty() && !self.collection.is_empty()
    }
}

/// Twilio channel-provider credentials and sender address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub phone_number: Option<String>,
}

impl TwilioConfig {
    /// Returns `(account_sid, auth_token, phone_number)` when all three are
    /// present, i.e. direct API delivery is possible.
    #[must_use]
    pub fn api_credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.account_sid, &self.auth_token, &self.phone_number) {
            (Some(sid), Some(token), Some(number)) => {
                Some((sid.as_str(), token.as_str(), number.as_str()))
            },
            _ => None,
        }
    }
}

/// Conversational-agent endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub url: Option<String>,
}
