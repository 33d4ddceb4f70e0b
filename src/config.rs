//! Pipeline configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{api, fetch, paths};
use crate::error::{Error, Result};

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Genius API bearer token
    pub genius_token: String,
    /// Root directory holding one sub-directory per artist
    pub base_path: PathBuf,
    /// Pause after every metadata API call
    pub api_cooldown: Duration,
    /// Pause after every `fetch::COOLDOWN_STRIDE` lyrics pages
    pub fetch_cooldown: Duration,
    /// Upper bound on any single HTTP request
    pub http_timeout: Duration,
    /// Whether a substring overlap between an accepted name and a credited
    /// artist counts as a match
    pub allow_partial_artist_match: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_token: String::new(),
            base_path: PathBuf::from(paths::DEFAULT_BASE_PATH),
            api_cooldown: Duration::from_secs(api::COOLDOWN_SECS),
            fetch_cooldown: Duration::from_secs(fetch::COOLDOWN_SECS),
            http_timeout: Duration::from_secs(api::TIMEOUT_SECS),
            allow_partial_artist_match: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(token) = env::var("GENIUS_TOKEN") {
            config.genius_token = token;
        }

        if let Ok(path) = env::var("LYRICS_BASE_PATH") {
            config.base_path = PathBuf::from(shellexpand::tilde(&path).to_string());
        }

        if let Some(secs) = env_u64("API_COOLDOWN_SECS") {
            config.api_cooldown = Duration::from_secs(secs);
        }

        if let Some(secs) = env_u64("FETCH_COOLDOWN_SECS") {
            config.fetch_cooldown = Duration::from_secs(secs);
        }

        if let Some(secs) = env_u64("HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Ok(flag) = env::var("ALLOW_PARTIAL_ARTIST_MATCH") {
            config.allow_partial_artist_match = parse_flag(&flag).unwrap_or(true);
        }

        Ok(config)
    }

    /// Check if the Genius API token is configured
    pub fn has_genius_token(&self) -> bool {
        !self.genius_token.trim().is_empty()
    }

    /// Fail early when a stage needs the API token
    pub fn require_genius_token(&self) -> Result<&str> {
        if self.has_genius_token() {
            Ok(self.genius_token.trim())
        } else {
            Err(Error::config(
                "Genius API token not configured",
                "Set GENIUS_TOKEN in the environment or a .env file",
            ))
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring non-numeric {key}={raw:?}");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
