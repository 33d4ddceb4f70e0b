//! Genius API access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::constants::api::{BASE_URL, PAGE_SIZE};
use crate::error::{Error, Result};

/// One page of an artist's song list.
#[derive(Debug, Clone, Default)]
pub struct SongPage {
    /// Raw song objects.
    pub songs: Vec<Value>,
    /// Page to request next; `None` on the last page.
    pub next_page: Option<u32>,
}

/// The two metadata endpoints the collector needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search hits for a free-text query, best first.
    async fn search(&self, query: &str) -> Result<Vec<Value>>;

    /// One page of the songs credited to the artist at `api_path`.
    async fn artist_songs(&self, api_path: &str, page: u32) -> Result<SongPage>;
}

/// Client for the Genius API.
///
/// Every request is followed by a fixed cooldown; calls are issued one at a
/// time.
#[derive(Clone)]
pub struct GeniusClient {
    token: String,
    base_url: String,
    cooldown: Duration,
    client: Client,
}

impl GeniusClient {
    /// Create a client from config. Fails when no token is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let token = config.require_genius_token()?.to_string();
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            token,
            base_url: BASE_URL.to_string(),
            cooldown: config.api_cooldown,
            client,
        })
    }

    /// Point the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make an authenticated GET request with query parameters
    async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let sent = self.client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await;

        // Throttle regardless of outcome.
        tokio::time::sleep(self.cooldown).await;

        let resp = sent.map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))
    }
}

#[async_trait]
impl CatalogApi for GeniusClient {
    async fn search(&self, query: &str) -> Result<Vec<Value>> {
        let json = self.get_with_query("/search", &[("q", query)]).await?;
        parse_hits(&json)
    }

    async fn artist_songs(&self, api_path: &str, page: u32) -> Result<SongPage> {
        let path = format!("{api_path}/songs");
        let page = page.to_string();
        let per_page = PAGE_SIZE.to_string();
        let json = self
            .get_with_query(&path, &[("page", page.as_str()), ("per_page", per_page.as_str())])
            .await?;
        parse_song_page(&json)
    }
}

/// `response.hits` of a search payload.
pub fn parse_hits(json: &Value) -> Result<Vec<Value>> {
    json["response"]["hits"]
        .as_array()
        .cloned()
        .ok_or_else(|| Error::parse("Missing 'response.hits' array in search response", None))
}

/// `response.songs` and `response.next_page` of a songs payload.
pub fn parse_song_page(json: &Value) -> Result<SongPage> {
    let response = &json["response"];
    let songs = response["songs"]
        .as_array()
        .cloned()
        .ok_or_else(|| Error::parse("Missing 'response.songs' array in songs response", None))?;
    let next_page = response["next_page"]
        .as_u64()
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p > 0);
    Ok(SongPage { songs, next_page })
}
