//! Channel webhook ingestion/delivery flow.
//!
//! Every inbound event is classified (audio, text, or empty), optionally run
//! through media retrieval and the agent, persisted, and answered. The
//! handler always produces a 200-class reply; upstream failures are absorbed
//! into localized apology texts, never surfaced as error statuses.

use {
    axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
    tracing::warn,
};

use {
    guichet_store::{ChatMessage, now, session_id_for},
    guichet_whatsapp::{Delivery, twiml},
};

use crate::{replies, state::AppState};

/// Inbound webhook fields, as the channel provider posts them.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, rename = "From")]
    pub from: String,
    #[serde(default, rename = "Body")]
    pub body: String,
    #[serde(default, rename = "MediaUrl0")]
    pub media_url: Option<String>,
    #[serde(default, rename = "MediaContentType0")]
    pub media_content_type: Option<String>,
}

/// Parse a webhook body. Form-encoded and JSON payloads are both accepted;
/// anything unparseable degrades to an empty payload.
pub fn parse_payload(content_type: Option<&str>, body: &[u8]) -> WebhookPayload {
    let is_form = content_type
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
    if is_form {
        let mut payload = WebhookPayload::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "From" => payload.from = value.into_owned(),
                "Body" => payload.body = value.into_owned(),
                "MediaUrl0" => payload.media_url = Some(value.into_owned()),
                "MediaContentType0" => payload.media_content_type = Some(value.into_owned()),
                _ => {},
            }
        }
        payload
    } else {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            warn!(error = %e, "webhook body not parseable, treating as empty");
            WebhookPayload::default()
        })
    }
}

/// Strip the channel-transport prefix from a raw sender identifier.
#[must_use]
pub fn normalize_user_id(raw: &str) -> &str {
    raw.strip_prefix("whatsapp:").unwrap_or(raw)
}

/// Classification of an inbound event.
enum Inbound {
    Audio { url: String, content_type: String },
    Text(String),
    Empty,
}

fn classify(payload: WebhookPayload) -> Inbound {
    if let (Some(url), Some(content_type)) = (payload.media_url, payload.media_content_type)
        && content_type.starts_with("audio")
    {
        return Inbound::Audio { url, content_type };
    }
    if !payload.body.is_empty() {
        return Inbound::Text(payload.body);
    }
    Inbound::Empty
}

fn render(delivery: Delivery) -> Response {
    match delivery {
        Delivery::Accepted => StatusCode::NO_CONTENT.into_response(),
        Delivery::Markup(xml) => {
            ([(header::CONTENT_TYPE, twiml::CONTENT_TYPE)], xml).into_response()
        },
        Delivery::Plain(text) => (StatusCode::OK, text).into_response(),
    }
}

/// `POST /webhook`
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let payload = parse_payload(content_type, &body);

    let user_id = normalize_user_id(&payload.from).to_owned();
    let session_id = session_id_for(&user_id);
    let timestamp = now();

    match classify(payload) {
        Inbound::Empty => (StatusCode::OK, replies::EMPTY_EVENT_NOTE).into_response(),
        Inbound::Text(text) => {
            state
                .log
                .append(ChatMessage::user(&user_id, &text, timestamp, &session_id))
                .await;

            match state
                .invoke_agent(&text, None, &user_id, &session_id)
                .await
            {
                Ok(reply) => {
                    state
                        .log
                        .append(ChatMessage::agent(&user_id, &reply, now(), &session_id))
                        .await;
                    render(state.messenger.deliver(&user_id, &reply).await)
                },
                Err(e) => {
                    warn!(user_id, error = %e, "agent error on text turn");
                    state
                        .log
                        .append(ChatMessage::agent(
                            &user_id,
                            replies::TEXT_AGENT_APOLOGY,
                            now(),
                            &session_id,
                        ))
                        .await;
                    render(state.messenger.reply_inline(replies::TEXT_AGENT_APOLOGY))
                },
            }
        },
        Inbound::Audio { url, content_type } => {
            let fetched = state.media.fetch_audio(&url).await;

            // The user attempted contact; the placeholder is persisted even
            // when the media itself cannot be retrieved.
            state
                .log
                .append(
                    ChatMessage::user(
                        &user_id,
                        replies::AUDIO_PLACEHOLDER,
                        timestamp,
                        &session_id,
                    )
                    .with_media(&url, &content_type),
                )
                .await;

            let audio = match fetched {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(user_id, url, error = %e, "media download failed");
                    return render(state.messenger.reply_inline(replies::MEDIA_FETCH_APOLOGY));
                },
            };

            match state
                .invoke_agent(replies::AUDIO_PROMPT, Some(&audio), &user_id, &session_id)
                .await
            {
                Ok(reply) => {
                    state
                        .log
                        .append(ChatMessage::agent(&user_id, &reply, now(), &session_id))
                        .await;
                    render(state.messenger.deliver(&user_id, &reply).await)
                },
                Err(e) => {
                    warn!(user_id, error = %e, "agent error on audio turn");
                    state
                        .log
                        .append(ChatMessage::agent(
                            &user_id,
                            replies::AUDIO_AGENT_APOLOGY,
                            now(),
                            &session_id,
                        ))
                        .await;
                    render(state.messenger.reply_inline(replies::AUDIO_AGENT_APOLOGY))
                },
            }
        },
    }
}
