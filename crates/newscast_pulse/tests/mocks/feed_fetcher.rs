use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use newscast_pulse::{FeedDocument, FeedFetcher};

/// In-memory fetcher serving canned documents per url and recording every
/// requested url
#[derive(Clone, Default)]
pub struct MockFeedFetcher {
    pub feeds: HashMap<String, Vec<u8>>,
    pub failures: HashMap<String, String>,
    pub delays: HashMap<String, Duration>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.feeds.insert(url.to_string(), body.into());
        self
    }

    pub fn failing_for(mut self, url: &str, msg: &str) -> Self {
        self.failures.insert(url.to_string(), msg.to_string());
        self
    }

    pub fn delayed(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

impl FeedFetcher for MockFeedFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<FeedDocument> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(msg) = self.failures.get(url) {
            return Err(anyhow::anyhow!("{}", msg));
        }

        self.feeds
            .get(url)
            .map(|body| FeedDocument::new(body.clone()))
            .ok_or_else(|| anyhow::anyhow!("connection refused: {}", url))
    }
}

/// Minimal podcast feed whose only item uses `id` as guid and `media_url` as
/// enclosure
pub fn podcast_feed(id: &str, media_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>mock channel</title>
    <item>
      <title>Episode {id}</title>
      <description>Description of {id}</description>
      <guid>{id}</guid>
      <itunes:image href="https://images.example.org/{id}.jpg"/>
      <enclosure url="{media_url}" type="video/mp4"/>
    </item>
  </channel>
</rss>"#
    )
}
