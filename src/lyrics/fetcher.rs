//! Fetch lyrics pages for a cataloged artist and persist one file per song.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fs_err as fs;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::constants::fetch::{COOLDOWN_STRIDE, USER_AGENT as BROWSER_AGENT};
use crate::constants::paths::CATALOG_SUFFIX;
use crate::csv;
use crate::error::{Error, Result};
use crate::lyrics::file::render;
use crate::lyrics::page::{parse_lyrics_page, repair_lyrics, LyricsPage};
use crate::types::SongRecord;

/// Outcome of one fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Songs listed in the catalog.
    pub songs: usize,
    /// Lyrics files written.
    pub written: usize,
    /// Songs skipped (failed fetch or no lyrics on the page).
    pub skipped: usize,
}

/// Scrapes lyrics pages for one artist over a single cookie-keeping session.
pub struct LyricsFetcher {
    artist: String,
    base_path: PathBuf,
    client: Client,
    cooldown: Duration,
}

impl LyricsFetcher {
    /// Create a fetcher for `artist` (the per-artist directory name).
    pub fn new(artist: impl Into<String>, config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP session: {e}")))?;

        Ok(Self {
            artist: artist.into(),
            base_path: config.base_path.clone(),
            client,
            cooldown: config.fetch_cooldown,
        })
    }

    /// Directory holding this artist's catalog and lyrics files.
    pub fn artist_dir(&self) -> PathBuf {
        self.base_path.join(&self.artist)
    }

    /// Path of the catalog CSV written by the collector.
    pub fn catalog_path(&self) -> PathBuf {
        self.artist_dir().join(format!("{}{CATALOG_SUFFIX}", self.artist))
    }

    /// Read the catalog CSV.
    pub fn load_catalog(&self) -> Result<Vec<SongRecord>> {
        load_catalog(&self.catalog_path())
    }

    /// Fetch every cataloged song, sequentially.
    pub async fn process_catalog(&self) -> Result<FetchReport> {
        let records = self.load_catalog()?;
        fs::create_dir_all(self.artist_dir())?;

        let mut report = FetchReport { songs: records.len(), ..FetchReport::default() };
        tracing::info!("Fetching lyrics for {} songs of {}", records.len(), self.artist);

        for (index, record) in records.iter().enumerate() {
            if self.process_entry(index, record).await? {
                report.written += 1;
            } else {
                report.skipped += 1;
            }
        }

        tracing::info!(
            "Wrote {} lyrics files for {} ({} skipped)",
            report.written,
            self.artist,
            report.skipped
        );
        Ok(report)
    }

    /// Fetch one song and write its lyrics file. Returns whether a file was written.
    pub async fn process_entry(&self, index: usize, record: &SongRecord) -> Result<bool> {
        tracing::debug!("{index} {} {} {}", record.artist, record.title, record.lyrics_url);

        let written = match self.fetch_page(&record.lyrics_url).await {
            Some(html) => match parse_lyrics_page(&html)? {
                Some(page) => {
                    self.write_song(record, &page)?;
                    true
                }
                None => {
                    tracing::warn!("No lyrics container for {}", record.data_title);
                    false
                }
            },
            None => false,
        };

        if (index + 1) % COOLDOWN_STRIDE == 0 {
            tokio::time::sleep(self.cooldown).await;
        }

        Ok(written)
    }

    /// Persist header + separator + repaired lyrics. Returns the file path.
    pub fn write_song(&self, record: &SongRecord, page: &LyricsPage) -> Result<PathBuf> {
        let path = self.artist_dir().join(record.file_name());
        let text = render(record, &page.song_id, &repair_lyrics(&page.lyrics));
        fs::write(&path, text)?;
        Ok(path)
    }

    /// GET a page; `None` on transport failure or any non-200 status.
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Request to {url} failed: {e}");
                return None;
            }
        };

        if resp.status() != StatusCode::OK {
            tracing::warn!("Request to {url} returned {}", resp.status());
            return None;
        }

        match resp.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Failed to read body of {url}: {e}");
                None
            }
        }
    }
}

/// Read a catalog CSV into records.
///
/// Tolerates a header row and a leading index column; rows of any other
/// width are logged and skipped.
pub fn load_catalog(path: &Path) -> Result<Vec<SongRecord>> {
    if !path.is_file() {
        return Err(Error::Csv {
            file: path.to_path_buf(),
            message: "catalog not found; run the collector first".into(),
        });
    }

    let rows = csv::read_rows(path)?;
    let mut records = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if is_header_row(row) {
            continue;
        }
        match SongRecord::from_row(row) {
            Some(record) => records.push(record),
            None => tracing::warn!(
                "Skipping row {n} of {} with {} cells",
                path.display(),
                row.len()
            ),
        }
    }
    Ok(records)
}

fn is_header_row(row: &[String]) -> bool {
    let cells = if row.len() == SongRecord::COLUMNS.len() + 1 { &row[1..] } else { row };
    cells.iter().map(String::as_str).eq(SongRecord::COLUMNS)
}
