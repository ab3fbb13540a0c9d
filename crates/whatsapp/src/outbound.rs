use {serde::Deserialize, tracing::debug};

use crate::{Error, Result};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Direct-delivery client for the Twilio messaging API.
pub struct TwilioOutbound {
    client: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize)]
struct SendResponse {
    sid: Option<String>,
}

impl TwilioOutbound {
    #[must_use]
    pub fn new(account_sid: &str, auth_token: &str, from_number: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.into(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        }
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Send a WhatsApp message, returning the provider message sid.
    pub async fn send_whatsapp(&self, to_user: &str, body: &str) -> Result<String> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        );
        let form = [
            ("From", format!("whatsapp:{}", self.from_number)),
            ("To", format!("whatsapp:{to_user}")),
            ("Body", body.to_owned()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = response.json().await?;
        let sid = parsed.sid.unwrap_or_default();
        debug!(sid, to_user, "twilio message accepted");
        Ok(sid)
    }
}
