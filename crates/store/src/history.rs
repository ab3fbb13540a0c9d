//! Read-side pagination and per-user summarization over the conversation
//! store.
//!
//! Every operation here degrades to an empty or partial result on store
//! failure. The cause is logged; callers never see an error.

use {serde::Serialize, tracing::warn};

use crate::{
    message::{ChatMessageView, format_utc},
    store::ConversationStore,
};

/// Number of recent messages attached per user when a listing includes
/// conversation summaries.
pub const SUMMARY_RECENT_LIMIT: u64 = 10;

/// Read-time projection of a user's conversation.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub total_messages: u64,
    pub recent_messages: Vec<ChatMessageView>,
    pub first_activity: Option<String>,
    pub last_activity: Option<String>,
}

/// One row of the users listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserOverview {
    pub user_id: String,
    pub latest_message: ChatMessageView,
    pub message_count: u64,
    pub last_activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_summary: Option<UserSummary>,
}

/// A page of a user's messages in chronological order.
///
/// The store is queried newest-first so the window always anchors to the most
/// recent message; the fetched page is then reversed so it reads oldest-first.
pub async fn history(
    store: &dyn ConversationStore,
    user_id: &str,
    limit: u64,
    skip: u64,
) -> Vec<ChatMessageView> {
    match store.recent_page(user_id, limit, skip).await {
        Ok(mut page) => {
            page.reverse();
            page.into_iter().map(Into::into).collect()
        },
        Err(e) => {
            warn!(user_id, error = %e, "chat history read failed");
            Vec::new()
        },
    }
}

/// Paginated listing of users present in the store, ascending by user id,
/// each with their latest message and total message count.
///
/// With `include_summary`, a bounded [`UserSummary`] is computed per selected
/// user, sequentially. That is a per-page query fan-out, not a batched
/// aggregation.
pub async fn list_users(
    store: &dyn ConversationStore,
    limit: u64,
    skip: u64,
    include_summary: bool,
) -> Vec<UserOverview> {
    let mut users = match store.distinct_users().await {
        Ok(users) => users,
        Err(e) => {
            warn!(error = %e, "user listing read failed");
            return Vec::new();
        },
    };
    users.sort();

    let mut overviews = Vec::new();
    for user_id in users.into_iter().skip(skip as usize).take(limit as usize) {
        let latest = match store.latest_for_user(&user_id).await {
            Ok(latest) => latest,
            Err(e) => {
                warn!(user_id, error = %e, "latest message read failed");
                None
            },
        };
        let Some(latest) = latest else {
            continue;
        };

        let message_count = match store.count_for_user(&user_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!(user_id, error = %e, "message count read failed");
                0
            },
        };

        let conversation_summary = if include_summary {
            Some(user_summary(store, &user_id, SUMMARY_RECENT_LIMIT).await)
        } else {
            None
        };

        let latest_message: ChatMessageView = latest.into();
        overviews.push(UserOverview {
            user_id,
            last_activity: latest_message.timestamp.clone(),
            latest_message,
            message_count,
            conversation_summary,
        });
    }
    overviews
}

/// Summary of one user's conversation: total count, the `limit` most recent
/// messages in chronological order, and first/last activity timestamps
/// (independent of `limit`).
pub async fn user_summary(
    store: &dyn ConversationStore,
    user_id: &str,
    limit: u64,
) -> UserSummary {
    let total_messages = match store.count_for_user(user_id).await {
        Ok(count) => count,
        Err(e) => {
            warn!(user_id, error = %e, "message count read failed");
            0
        },
    };

    let recent_messages = match store.recent_page(user_id, limit, 0).await {
        Ok(mut page) => {
            page.reverse();
            page.into_iter().map(Into::into).collect()
        },
        Err(e) => {
            warn!(user_id, error = %e, "recent messages read failed");
            Vec::new()
        },
    };

    let first_activity = match store.oldest_for_user(user_id).await {
        Ok(first) => first.map(|m| format_utc(m.timestamp)),
        Err(e) => {
            warn!(user_id, error = %e, "first activity read failed");
            None
        },
    };
    let last_activity = match store.latest_for_user(user_id).await {
        Ok(last) => last.map(|m| format_utc(m.timestamp)),
        Err(e) => {
            warn!(user_id, error = %e, "last activity read failed");
            None
        },
    };

    UserSummary {
        user_id: user_id.into(),
        total_messages,
        recent_messages,
        first_activity,
        last_activity,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            memory::MemoryConversationStore,
            message::{ChatMessage, session_id_for},
        },
        mongodb::bson::DateTime,
    };

    async fn seeded(user_id: &str, count: i64) -> MemoryConversationStore {
        let store = MemoryConversationStore::new();
        for i in 0..count {
            store
                .insert(ChatMessage::user(
                    user_id,
                    &format!("m{i}"),
                    DateTime::from_millis(1_000 + i * 1_000),
                    &session_id_for(user_id),
                ))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn history_is_chronological() {
        let store = seeded("u1", 5).await;
        let page = history(&store, "u1", 10, 0).await;
        let bodies: Vec<&str> = page.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(bodies, ["m0", "m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn history_window_equals_reversed_newest_first_slice() {
        let store = seeded("u1", 6).await;
        let full_newest_first = store.recent_page("u1", 100, 0).await.unwrap();

        let (limit, skip) = (2u64, 1u64);
        let page = history(&store, "u1", limit, skip).await;

        let mut expected: Vec<String> = full_newest_first
            [skip as usize..(skip + limit) as usize]
            .iter()
            .map(|m| m.message.clone())
            .collect();
        expected.reverse();

        let got: Vec<String> = page.iter().map(|m| m.message.clone()).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn history_unknown_user_is_empty() {
        let store = seeded("u1", 2).await;
        assert!(history(&store, "nobody", 10, 0).await.is_empty());
    }

    #[tokio::test]
    async fn list_users_sorted_and_paginated() {
        let store = MemoryConversationStore::new();
        for (user, ts) in [("charlie", 3), ("alpha", 1), ("bravo", 2)] {
            store
                .insert(ChatMessage::user(
                    user,
                    "hello",
                    DateTime::from_millis(ts),
                    &session_id_for(user),
                ))
                .await
                .unwrap();
        }

        let all = list_users(&store, 10, 0, false).await;
        let ids: Vec<&str> = all.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, ["alpha", "bravo", "charlie"]);

        let page = list_users(&store, 1, 1, false).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].user_id, "bravo");
        assert!(page[0].conversation_summary.is_none());
    }

    #[tokio::test]
    async fn list_users_attaches_latest_and_count() {
        let store = seeded("u1", 3).await;
        let users = list_users(&store, 10, 0, false).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].message_count, 3);
        assert_eq!(users[0].latest_message.message, "m2");
        assert_eq!(users[0].last_activity, users[0].latest_message.timestamp);
    }

    #[tokio::test]
    async fn list_users_include_summary_is_bounded() {
        let store = seeded("u1", 15).await;
        let users = list_users(&store, 10, 0, true).await;
        let summary = users[0].conversation_summary.as_ref().unwrap();
        assert_eq!(summary.total_messages, 15);
        assert_eq!(summary.recent_messages.len(), SUMMARY_RECENT_LIMIT as usize);
    }

    #[tokio::test]
    async fn summary_activity_is_independent_of_limit() {
        let store = seeded("u1", 8).await;
        let summary = user_summary(&store, "u1", 2).await;

        assert_eq!(summary.total_messages, 8);
        assert_eq!(summary.recent_messages.len(), 2);
        // Recent page is chronological.
        assert_eq!(summary.recent_messages[0].message, "m6");
        assert_eq!(summary.recent_messages[1].message, "m7");
        // First/last activity bracket the whole history, not the page.
        assert_eq!(
            summary.first_activity.as_deref(),
            Some(format_utc(DateTime::from_millis(1_000)).as_str())
        );
        assert_eq!(
            summary.last_activity.as_deref(),
            Some(format_utc(DateTime::from_millis(8_000)).as_str())
        );
    }

    #[tokio::test]
    async fn summary_for_unknown_user_is_empty() {
        let store = MemoryConversationStore::new();
        let summary = user_summary(&store, "nobody", 10).await;
        assert_eq!(summary.total_messages, 0);
        assert!(summary.recent_messages.is_empty());
        assert!(summary.first_activity.is_none());
        assert!(summary.last_activity.is_none());
    }
}
