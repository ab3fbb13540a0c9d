//! Append-only conversation persistence and read-side aggregation.
//!
//! Writes go through [`ConversationLog`], a best-effort façade that never
//! surfaces failures to the caller: a persistence problem must not prevent the
//! user from receiving a conversational reply. Reads go through the
//! [`history`] aggregator over a [`ConversationStore`] backend.

pub mod error;
pub mod history;
pub mod log;
pub mod memory;
pub mod message;
pub mod mongo;
pub mod store;

pub use {
    error::{Error, Result},
    log::ConversationLog,
    memory::MemoryConversationStore,
    message::{ChatMessage, ChatMessageView, Sender, format_utc, now, session_id_for},
    mongo::MongoConversationStore,
    store::ConversationStore,
};
