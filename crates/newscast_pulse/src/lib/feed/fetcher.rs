use std::{ops::Deref, time::Duration};

use crate::{
    error::Error,
    feed::{FeedDocument, FeedFetcher},
};

/// Plain reqwest client fetching feeds over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher(pub reqwest::Client);

impl Deref for HttpFetcher {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HttpFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher(client))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
            .inspect_err(|e| tracing::warn!(error = %e, "Falling back to default http client"))
            .unwrap_or_else(|_| HttpFetcher(reqwest::Client::new()))
    }
}

impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<FeedDocument> {
        tracing::debug!(%url, "Fetching feed");

        let response = self
            .get(url)
            .send()
            .await
            .map_err(Error::from)
            .inspect_err(|e| tracing::error!(error = %e, %url, "Failed to make http request"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(Error::from)?;
        Ok(FeedDocument::from(bytes.to_vec()))
    }
}
