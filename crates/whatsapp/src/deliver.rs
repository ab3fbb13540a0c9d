use tracing::{info, warn};

use guichet_config::TwilioConfig;

use crate::{format::format_for_whatsapp, outbound::TwilioOutbound, twiml};

/// Outcome of the delivery fallback chain. Always a valid reply; the chain
/// itself never errors.
#[derive(Debug)]
pub enum Delivery {
    /// The message went out through the provider API; acknowledge with an
    /// empty body.
    Accepted,
    /// Inline channel-markup reply to return as the HTTP response body.
    Markup(String),
    /// Raw formatted text, the ultimate fallback.
    Plain(String),
}

/// Tiered outbound delivery for agent replies.
pub struct Messenger {
    outbound: Option<TwilioOutbound>,
}

impl Messenger {
    /// Direct API delivery is enabled only when credentials and a sender
    /// address are all configured.
    #[must_use]
    pub fn from_config(config: &TwilioConfig) -> Self {
        let outbound = config
            .api_credentials()
            .map(|(sid, token, number)| TwilioOutbound::new(sid, token, number));
        Self { outbound }
    }

    #[must_use]
    pub fn with_outbound(outbound: Option<TwilioOutbound>) -> Self {
        Self { outbound }
    }

    /// Deliver an agent reply: provider API first, inline markup on
    /// configuration absence or API failure, raw text last.
    pub async fn deliver(&self, user_id: &str, text: &str) -> Delivery {
        let body = format_for_whatsapp(text);

        if let Some(outbound) = &self.outbound {
            match outbound.send_whatsapp(user_id, &body).await {
                Ok(sid) => {
                    info!(sid, user_id, "reply sent via twilio");
                    return Delivery::Accepted;
                },
                Err(e) => {
                    warn!(user_id, error = %e, "twilio delivery failed, replying inline");
                },
            }
        }

        self.inline(body)
    }

    /// Inline-only reply (markup, then raw text). Used for apology replies
    /// and as the lower tiers of [`Messenger::deliver`].
    pub fn reply_inline(&self, text: &str) -> Delivery {
        self.inline(format_for_whatsapp(text))
    }

    fn inline(&self, body: String) -> Delivery {
        match twiml::message_reply(&body) {
            Ok(xml) => Delivery::Markup(xml),
            Err(e) => {
                warn!(error = %e, "twiml construction failed, replying as plain text");
                Delivery::Plain(body)
            },
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> Messenger {
        Messenger::from_config(&TwilioConfig::default())
    }

    #[tokio::test]
    async fn unconfigured_provider_replies_with_markup() {
        let delivery = unconfigured().deliver("212600000000", "**Bonjour**").await;
        match delivery {
            Delivery::Markup(xml) => assert!(xml.contains("<Message>*Bonjour*</Message>")),
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_success_returns_accepted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_body(r#"{"sid":"SM1"}"#)
            .create_async()
            .await;

        let outbound =
            TwilioOutbound::new("AC123", "token", "+212500000000").with_api_base(server.url());
        let messenger = Messenger::with_outbound(Some(outbound));
        assert!(matches!(
            messenger.deliver("212600000000", "Bonjour").await,
            Delivery::Accepted
        ));
    }

    #[tokio::test]
    async fn api_failure_falls_back_to_markup() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_status(500)
            .create_async()
            .await;

        let outbound =
            TwilioOutbound::new("AC123", "token", "+212500000000").with_api_base(server.url());
        let messenger = Messenger::with_outbound(Some(outbound));
        match messenger.deliver("212600000000", "**gras**").await {
            Delivery::Markup(xml) => assert!(xml.contains("*gras*")),
            other => panic!("unexpected delivery: {other:?}"),
        }
    }

    #[tokio::test]
    async fn formatting_applies_on_every_path() {
        match unconfigured().reply_inline("**important**") {
            Delivery::Markup(xml) => assert!(xml.contains("*important*")),
            other => panic!("unexpected delivery: {other:?}"),
        }
    }
}
