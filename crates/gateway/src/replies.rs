//! Fixed reply texts.
//!
//! Apologies are localized for the French-speaking customer base and are
//! persisted as agent turns when they substitute a failed agent reply.

/// Diagnostic acknowledgement for webhook events carrying neither text nor
/// usable media. The only reply that performs zero writes.
pub const EMPTY_EVENT_NOTE: &str = "Missing user_id or message";

/// Placeholder body persisted for audio-originated user turns.
pub const AUDIO_PLACEHOLDER: &str = "[Audio Message]";

/// Instruction sent to the agent alongside raw audio bytes.
pub const AUDIO_PROMPT: &str =
    "Listen to this audio. Search knowledge base and respond in French using 'vous'.";

/// Agent failure on the direct chat API.
pub const CHAT_AGENT_APOLOGY: &str =
    "Désolé, une erreur est survenue en traitant votre demande. Réessayez dans un instant.";

/// Media download failure.
pub const MEDIA_FETCH_APOLOGY: &str =
    "Désolé, je n'ai pas pu récupérer l'audio. Réessayez plus tard.";

/// Agent failure while handling an audio turn.
pub const AUDIO_AGENT_APOLOGY: &str =
    "Désolé, une erreur est survenue avec le traitement audio. Réessayez plus tard.";

/// Agent failure while handling a text turn.
pub const TEXT_AGENT_APOLOGY: &str =
    "Désolé, une erreur est survenue. Réessayez dans un instant.";
