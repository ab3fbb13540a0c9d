use {
    mongodb::bson::{DateTime, oid::ObjectId},
    serde::{Deserialize, Serialize},
};

/// Originator of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// A single persisted conversation message. Append-only: documents are never
/// updated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub message: String,
    pub sender: Sender,
    pub timestamp: DateTime,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl ChatMessage {
    pub fn user(user_id: &str, message: &str, timestamp: DateTime, session_id: &str) -> Self {
        Self::new(user_id, message, Sender::User, timestamp, session_id)
    }

    pub fn agent(user_id: &str, message: &str, timestamp: DateTime, session_id: &str) -> Self {
        Self::new(user_id, message, Sender::Agent, timestamp, session_id)
    }

    fn new(
        user_id: &str,
        message: &str,
        sender: Sender,
        timestamp: DateTime,
        session_id: &str,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            message: message.into(),
            sender,
            timestamp,
            session_id: session_id.into(),
            audio_url: None,
            media_type: None,
        }
    }

    /// Attach media provenance to a media-originated user turn.
    #[must_use]
    pub fn with_media(mut self, audio_url: &str, media_type: &str) -> Self {
        self.audio_url = Some(audio_url.into());
        self.media_type = Some(media_type.into());
        self
    }
}

/// Read shape of a persisted message: `_id` as a hex string and the timestamp
/// as an ISO-8601 UTC string with a trailing `Z`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageView {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub sender: Sender,
    pub timestamp: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl From<ChatMessage> for ChatMessageView {
    fn from(msg: ChatMessage) -> Self {
        Self {
            id: msg.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user_id: msg.user_id,
            message: msg.message,
            sender: msg.sender,
            timestamp: format_utc(msg.timestamp),
            session_id: msg.session_id,
            audio_url: msg.audio_url,
            media_type: msg.media_type,
        }
    }
}

/// Derive the long-lived session grouping key for a user.
#[must_use]
pub fn session_id_for(user_id: &str) -> String {
    format!("{user_id}_session")
}

/// Current UTC instant at millisecond precision.
#[must_use]
pub fn now() -> DateTime {
    DateTime::from_millis(chrono::Utc::now().timestamp_millis())
}

/// Format a BSON datetime as ISO-8601 UTC with an explicit `Z` marker.
#[must_use]
pub fn format_utc(ts: DateTime) -> String {
    chrono::DateTime::from_timestamp_millis(ts.timestamp_millis())
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_default()
}
