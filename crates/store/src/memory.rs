use std::sync::Mutex;

use mongodb::bson::oid::ObjectId;

use crate::{Result, message::ChatMessage, store::ConversationStore};

/// In-process conversation store. Primarily a test backend; it honors the same
/// read-sorts-by-timestamp contract as the MongoDB store.
#[derive(Default)]
pub struct MemoryConversationStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot_for_user(&self, user_id: &str) -> Vec<ChatMessage> {
        let messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        let mut matching: Vec<ChatMessage> = messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|m| m.timestamp);
        matching
    }
}

#[async_trait::async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn insert(&self, mut message: ChatMessage) -> Result<()> {
        if message.id.is_none() {
            message.id = Some(ObjectId::new());
        }
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        Ok(())
    }

    async fn recent_page(&self, user_id: &str, limit: u64, skip: u64) -> Result<Vec<ChatMessage>> {
        let mut chronological = self.snapshot_for_user(user_id);
        chronological.reverse();
        Ok(chronological
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn distinct_users(&self) -> Result<Vec<String>> {
        let messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        let mut users: Vec<String> = messages.iter().map(|m| m.user_id.clone()).collect();
        users.sort();
        users.dedup();
        Ok(users)
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>> {
        Ok(self.snapshot_for_user(user_id).pop())
    }

    async fn oldest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>> {
        Ok(self.snapshot_for_user(user_id).into_iter().next())
    }

    async fn count_for_user(&self, user_id: &str) -> Result<u64> {
        Ok(self.snapshot_for_user(user_id).len() as u64)
    }
}
