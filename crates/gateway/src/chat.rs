//! Chat API routes: history, user listing, per-user summary, and the direct
//! (non-channel) chat turn.

use {
    axum::{
        Json,
        body::Bytes,
        extract::{Path, Query, State},
    },
    serde::{Deserialize, Serialize},
    tracing::warn,
};

use guichet_store::{
    ChatMessage, ChatMessageView, format_utc,
    history::{self, UserOverview, UserSummary},
    now, session_id_for,
};

use crate::{error::ApiError, replies, state::AppState};

// ── Query parameters ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    limit: i64,
    #[serde(default)]
    skip: i64,
}

#[derive(Deserialize)]
pub struct UsersParams {
    #[serde(default = "default_users_limit")]
    limit: i64,
    #[serde(default)]
    skip: i64,
    #[serde(default)]
    include_summary: bool,
}

#[derive(Deserialize)]
pub struct SummaryParams {
    #[serde(default = "default_summary_limit")]
    limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

fn default_users_limit() -> i64 {
    20
}

fn default_summary_limit() -> i64 {
    10
}

fn check_limit(limit: i64, max: i64) -> Result<u64, ApiError> {
    if (1..=max).contains(&limit) {
        Ok(limit as u64)
    } else {
        Err(ApiError::Validation(format!(
            "limit must be between 1 and {max}"
        )))
    }
}

fn check_skip(skip: i64) -> Result<u64, ApiError> {
    if skip >= 0 {
        Ok(skip as u64)
    } else {
        Err(ApiError::Validation("skip must be non-negative".into()))
    }
}

// ── Response shapes ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub messages: Vec<ChatMessageView>,
    pub total_messages: usize,
    pub limit: u64,
    pub skip: u64,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserOverview>,
    pub total_users: usize,
    pub limit: u64,
    pub skip: u64,
    pub include_summary: bool,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub user_id: String,
    pub message: String,
    pub agent_response: String,
    pub timestamp: String,
}

#[derive(Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /api/chat/history/{user_id}`
pub async fn history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = check_limit(params.limit, 100)?;
    let skip = check_skip(params.skip)?;

    let Some(store) = state.log.store() else {
        return Err(ApiError::StoreNotConfigured);
    };
    let messages = history::history(store.as_ref(), &user_id, limit, skip).await;

    Ok(Json(HistoryResponse {
        total_messages: messages.len(),
        user_id,
        messages,
        limit,
        skip,
    }))
}

/// `GET /api/chat/users`
pub async fn users_handler(
    State(state): State<AppState>,
    Query(params): Query<UsersParams>,
) -> Result<Json<UsersResponse>, ApiError> {
    let limit = check_limit(params.limit, 100)?;
    let skip = check_skip(params.skip)?;

    let Some(store) = state.log.store() else {
        return Err(ApiError::StoreNotConfigured);
    };
    let users = history::list_users(store.as_ref(), limit, skip, params.include_summary).await;

    Ok(Json(UsersResponse {
        total_users: users.len(),
        users,
        limit,
        skip,
        include_summary: params.include_summary,
    }))
}

/// `GET /api/chat/users/{user_id}/summary`
pub async fn user_summary_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<UserSummary>, ApiError> {
    let limit = check_limit(params.limit, 50)?;

    let Some(store) = state.log.store() else {
        return Err(ApiError::StoreNotConfigured);
    };
    Ok(Json(history::user_summary(store.as_ref(), &user_id, limit).await))
}

/// `POST /api/chat`: one direct chat turn. Persist the user message, invoke
/// the agent (substituting the apology on failure), persist the reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    // Lenient parse: a malformed body is treated as an empty request and
    // rejected by field validation below.
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!(error = %e, "chat request body not parseable");
        ChatRequest::default()
    });
    let (Some(user_id), Some(message)) = (
        request.user_id.filter(|v| !v.is_empty()),
        request.message.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::Validation(
            "user_id and message are required".into(),
        ));
    };

    let timestamp = now();
    let session_id = session_id_for(&user_id);

    state
        .log
        .append(ChatMessage::user(&user_id, &message, timestamp, &session_id))
        .await;

    let agent_response = match state
        .invoke_agent(&message, None, &user_id, &session_id)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!(user_id, error = %e, "agent error on chat API");
            replies::CHAT_AGENT_APOLOGY.to_owned()
        },
    };

    state
        .log
        .append(ChatMessage::agent(
            &user_id,
            &agent_response,
            now(),
            &session_id,
        ))
        .await;

    Ok(Json(ChatResponse {
        user_id,
        message,
        agent_response,
        timestamp: format_utc(timestamp),
    }))
}
