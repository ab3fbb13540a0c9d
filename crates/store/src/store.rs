use async_trait::async_trait;

use crate::{Result, message::ChatMessage};

/// Append-only persistence of conversation messages.
///
/// Insertion order is not guaranteed to match timestamp order under
/// concurrent writers, so every read sorts explicitly by `timestamp`.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append one message. Existing documents are never touched.
    async fn insert(&self, message: ChatMessage) -> Result<()>;

    /// The `skip..skip+limit` window of a user's messages, newest first.
    async fn recent_page(&self, user_id: &str, limit: u64, skip: u64) -> Result<Vec<ChatMessage>>;

    /// Distinct user ids present in the store, in no particular order.
    async fn distinct_users(&self) -> Result<Vec<String>>;

    /// The user's most recent message, if any.
    async fn latest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>>;

    /// The user's earliest message, if any.
    async fn oldest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>>;

    /// Total number of messages recorded for the user.
    async fn count_for_user(&self, user_id: &str) -> Result<u64>;
}
