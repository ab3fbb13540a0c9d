use std::sync::Arc;

use tracing::warn;

use crate::{message::ChatMessage, store::ConversationStore};

/// Best-effort write façade over the conversation store.
///
/// Appends are fire-and-forget relative to the caller: with no backend
/// configured they are silent no-ops, and write failures are logged and
/// swallowed so a persistence problem never blocks the conversational reply.
#[derive(Clone, Default)]
pub struct ConversationLog {
    backend: Option<Arc<dyn ConversationStore>>,
}

impl ConversationLog {
    #[must_use]
    pub fn new(backend: Arc<dyn ConversationStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A log with no backend: every append is a no-op, every read path 503s.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Read-side access to the backend, when one is configured.
    #[must_use]
    pub fn store(&self) -> Option<&Arc<dyn ConversationStore>> {
        self.backend.as_ref()
    }

    /// Append a message, best effort.
    pub async fn append(&self, message: ChatMessage) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.insert(message).await {
            warn!(error = %e, "skipping chat message insert");
        }
    }
}
