use tracing::debug;

use crate::schema::{AgentConfig, GuichetConfig, ServerConfig, StoreConfig, TwilioConfig};

/// Load configuration from process environment variables.
pub fn from_env() -> GuichetConfig {
    from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an injectable variable lookup.
///
/// Empty values are treated as unset, matching how deployment environments
/// commonly blank out secrets instead of removing them.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GuichetConfig {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let defaults = StoreConfig::default();
    let server_defaults = ServerConfig::default();

    let config = GuichetConfig {
        server: ServerConfig {
            host: get("GUICHET_HOST").unwrap_or(server_defaults.host),
            port: get("GUICHET_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(server_defaults.port),
        },
        store: StoreConfig {
            uri: get("MONGODB_URI"),
            database: get("MONGODB_DB").unwrap_or(defaults.database),
            collection: get("MONGODB_COLLECTION").unwrap_or(defaults.collection),
        },
        twilio: TwilioConfig {
            account_sid: get("TWILIO_ACCOUNT_SID"),
            auth_token: get("TWILIO_AUTH_TOKEN"),
            phone_number: get("TWILIO_PHONE_NUMBER"),
        },
        agent: AgentConfig {
            url: get("AGENT_URL"),
        },
    };

    debug!(
        store_configured = config.store.is_configured(),
        twilio_configured = config.twilio.api_credentials().is_some(),
        agent_configured = config.agent.url.is_some(),
        "configuration loaded"
    );
    config
}
