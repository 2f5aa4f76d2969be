//! News feed fetching.
//!
//! Parsing is delegated entirely to feed-rs; this module fetches the bytes
//! and maps entries onto the narrow `FeedItem` shape the narrator needs.
//! Fetch and parse failures surface as typed errors so the control loop can
//! skip the feed without dying.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

const USER_AGENT: &str = concat!("news-narrator-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("feed parse failed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// One feed entry, reduced to what gets narrated and journaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Empty when the feed carries no summary for the entry.
    pub description: String,
}

impl FeedItem {
    /// Text handed to the summarizer: the description when present,
    /// otherwise the title.
    pub fn summary_source(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}

/// Feed-fetching collaborator.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FeedError>;
}

/// Production feed source: HTTP GET plus feed-rs parsing.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build feed HTTP client");
        Self { client }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FeedError> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status()));
        }
        let bytes = resp.bytes().await?;
        let items = parse_items(&bytes)?;
        info!(url, items = items.len(), "feed fetched");
        Ok(items)
    }
}

/// Map a raw RSS/Atom document onto `FeedItem`s, preserving entry order.
fn parse_items(bytes: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
    let feed = feed_rs::parser::parse(bytes)?;
    Ok(feed
        .entries
        .into_iter()
        .map(|entry| FeedItem {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            description: entry.summary.map(|s| s.content).unwrap_or_default(),
        })
        .collect())
}
