use {
    futures::TryStreamExt,
    mongodb::{Client, Collection, bson::doc},
};

use {guichet_config::StoreConfig, tracing::debug};

use crate::{Result, message::ChatMessage, store::ConversationStore};

/// MongoDB-backed conversation store.
///
/// Every operation opens its own client and drops it on exit. The hosting
/// runtime may recycle its reactor between invocations, and a connection
/// bound to a defunct reactor fails silently or hangs.
pub struct MongoConversationStore {
    uri: String,
    database: String,
    collection: String,
}

impl MongoConversationStore {
    /// Build a store from configuration. Returns `None` when the store
    /// configuration is incomplete.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let uri = config.uri.clone()?;
        Some(Self {
            uri,
            database: config.database.clone(),
            collection: config.collection.clone(),
        })
    }

    /// Scoped handle acquisition: a fresh client per operation, released via
    /// drop on every exit path.
    async fn collection(&self) -> Result<Collection<ChatMessage>> {
        let client = Client::with_uri_str(&self.uri).await?;
        Ok(client
            .database(&self.database)
            .collection(&self.collection))
    }
}

#[async_trait::async_trait]
impl ConversationStore for MongoConversationStore {
    async fn insert(&self, message: ChatMessage) -> Result<()> {
        let collection = self.collection().await?;
        collection.insert_one(&message).await?;
        debug!(user_id = %message.user_id, sender = ?message.sender, "chat message stored");
        Ok(())
    }

    async fn recent_page(&self, user_id: &str, limit: u64, skip: u64) -> Result<Vec<ChatMessage>> {
        let collection = self.collection().await?;
        let cursor = collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": -1 })
            .skip(skip)
            .limit(limit as i64)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn distinct_users(&self) -> Result<Vec<String>> {
        let collection = self.collection().await?;
        let values = collection.distinct("user_id", doc! {}).await?;
        Ok(values
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect())
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>> {
        let collection = self.collection().await?;
        Ok(collection
            .find_one(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": -1 })
            .await?)
    }

    async fn oldest_for_user(&self, user_id: &str) -> Result<Option<ChatMessage>> {
        let collection = self.collection().await?;
        Ok(collection
            .find_one(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": 1 })
            .await?)
    }

    async fn count_for_user(&self, user_id: &str) -> Result<u64> {
        let collection = self.collection().await?;
        Ok(collection
            .count_documents(doc! { "user_id": user_id })
            .await?)
    }
}
