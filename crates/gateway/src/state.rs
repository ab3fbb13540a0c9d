use std::sync::Arc;

use {tokio::sync::OnceCell, tracing::warn};

use {
    guichet_agent::{Agent, HttpAgent},
    guichet_config::GuichetConfig,
    guichet_media::MediaFetcher,
    guichet_store::{ConversationLog, MongoConversationStore},
    guichet_whatsapp::Messenger,
};

/// Shared state passed by reference into every request handler.
pub type AppState = Arc<GatewayState>;

pub struct GatewayState {
    pub config: GuichetConfig,
    pub log: ConversationLog,
    pub messenger: Messenger,
    pub media: MediaFetcher,
    agent: OnceCell<Arc<dyn Agent>>,
}

impl GatewayState {
    /// Assemble state from configuration: MongoDB-backed log when the store
    /// is configured, otherwise a disabled log (reads 503, writes no-op).
    #[must_use]
    pub fn from_config(config: GuichetConfig) -> Self {
        let log = match MongoConversationStore::from_config(&config.store) {
            Some(store) => ConversationLog::new(Arc::new(store)),
            None => {
                warn!("conversation store not configured, history disabled");
                ConversationLog::disabled()
            },
        };
        let messenger = Messenger::from_config(&config.twilio);
        Self::with_parts(config, log, messenger)
    }

    /// Assemble state from pre-built collaborators.
    #[must_use]
    pub fn with_parts(config: GuichetConfig, log: ConversationLog, messenger: Messenger) -> Self {
        Self {
            config,
            log,
            messenger,
            media: MediaFetcher::new(),
            agent: OnceCell::new(),
        }
    }

    /// Pre-seed the agent handle (dependency injection for tests and the CLI).
    pub fn set_agent(&self, agent: Arc<dyn Agent>) {
        let _ = self.agent.set(agent);
    }

    /// Process-wide agent handle, built once on first use. Concurrent first
    /// callers are coordinated: one constructs, the rest await and reuse.
    pub async fn agent(&self) -> guichet_agent::Result<&Arc<dyn Agent>> {
        self.agent
            .get_or_try_init(|| async {
                HttpAgent::from_config(&self.config.agent)
                    .map(|agent| Arc::new(agent) as Arc<dyn Agent>)
            })
            .await
    }

    /// Run one agent turn, returning the reply text.
    pub async fn invoke_agent(
        &self,
        prompt: &str,
        audio: Option<&[u8]>,
        user_id: &str,
        session_id: &str,
    ) -> guichet_agent::Result<String> {
        let agent = self.agent().await?;
        let reply = agent.invoke(prompt, audio, user_id, session_id).await?;
        Ok(reply.text().to_owned())
    }
}
