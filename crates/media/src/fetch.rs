use {bytes::Bytes, tracing::debug};

use crate::{Error, Result};

/// Downloads media referenced by inbound messages.
///
/// Automatic redirect following is disabled so the one-hop policy stays
/// explicit: a redirect status with a `Location` header is followed exactly
/// once, and anything short of success after that is a failure.
pub struct MediaFetcher {
    client: reqwest::Client,
}

impl MediaFetcher {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch the raw bytes behind a media URL.
    pub async fn fetch_audio(&self, url: &str) -> Result<Bytes> {
        let mut response = self.client.get(url).send().await?;

        if response.status().is_redirection() {
            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
                .ok_or(Error::RedirectWithoutLocation { status })?;
            debug!(url, location, "following media redirect");
            response = self.client.get(&location).send().await?;
        }

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

impl Default for MediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}
