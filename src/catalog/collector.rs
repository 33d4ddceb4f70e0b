//! Build an artist's song catalog from the metadata API.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::audit::AuditLog;
use crate::catalog::api::CatalogApi;
use crate::catalog::extract::extract_song_data;
use crate::catalog::filter::{ArtistFilter, Verdict};
use crate::constants::catalog::FLUSH_BATCH;
use crate::constants::paths::CATALOG_SUFFIX;
use crate::csv;
use crate::error::Result;
use crate::types::{QuerySpec, SongRecord};

/// Outcome of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Artists whose catalogs were paged.
    pub artists: usize,
    /// Songs written to the catalog CSV.
    pub kept: usize,
    /// Songs rejected by the filter.
    pub excluded: usize,
    /// Catalog CSV path.
    pub output: PathBuf,
}

/// Pages an artist's songs and appends the relevant ones to the catalog CSV.
pub struct SongDataPuller<A> {
    api: A,
    base_path: PathBuf,
    audit: AuditLog,
    allow_partial: bool,
}

impl<A: CatalogApi> SongDataPuller<A> {
    /// Create a collector writing under `base_path`.
    pub fn new(api: A, base_path: impl Into<PathBuf>, audit: AuditLog, allow_partial: bool) -> Self {
        Self {
            api,
            base_path: base_path.into(),
            audit,
            allow_partial,
        }
    }

    /// Catalog CSV path for a directory name.
    pub fn catalog_path(&self, dir: &str) -> PathBuf {
        self.base_path.join(dir).join(format!("{dir}{CATALOG_SUFFIX}"))
    }

    /// Collect every relevant song for `spec` into `base_path/dir/dir_data.csv`.
    ///
    /// `dir` defaults to [`QuerySpec::dir_name`]. Rows are appended in
    /// batches, so an interrupted run leaves the songs seen so far on disk.
    pub async fn pull_all_song_data(&self, spec: &QuerySpec, dir: Option<&str>) -> Result<CollectReport> {
        let dir = dir.map_or_else(|| spec.dir_name(), str::to_string);
        let output = self.catalog_path(&dir);
        let filter = ArtistFilter::new(spec, self.allow_partial);
        tracing::info!("Starting {} -> {}", spec.query, output.display());

        let artists = self.resolve_artists(spec, &filter).await?;
        let mut report = CollectReport { artists: artists.len(), output, ..CollectReport::default() };

        for (name, api_path) in &artists {
            tracing::info!("{}: paging songs of {name} ({api_path})", spec.query);
            let mut bucket: Vec<SongRecord> = Vec::with_capacity(FLUSH_BATCH);
            let mut page = Some(1);

            while let Some(current) = page {
                let songs = self.api.artist_songs(api_path, current).await?;
                page = songs.next_page;

                for song in &songs.songs {
                    match self.load_song(song, spec, &filter)? {
                        Some(record) => {
                            bucket.push(record);
                            report.kept += 1;
                        }
                        None => report.excluded += 1,
                    }
                    if bucket.len() >= FLUSH_BATCH {
                        flush(&report.output, &mut bucket)?;
                    }
                }
            }
            // remaining songs of this artist
            flush(&report.output, &mut bucket)?;
        }

        self.audit.record(&format!("****{} done", spec.query))?;
        tracing::info!(
            "{} done: {} kept, {} excluded",
            spec.query,
            report.kept,
            report.excluded
        );
        Ok(report)
    }

    /// The artists to page: the known id, or the filtered and de-duplicated search hits.
    pub async fn resolve_artists(
        &self,
        spec: &QuerySpec,
        filter: &ArtistFilter,
    ) -> Result<BTreeSet<(String, String)>> {
        if let Some(id) = spec.rg_id {
            return Ok(BTreeSet::from([(
                spec.effective_artist().to_string(),
                format!("/artists/{id}"),
            )]));
        }
        let hits = self.api.search(&spec.query).await?;
        Ok(filter_artists(&hits, &spec.query, filter))
    }

    /// Extract, filter and audit one song. `Some` when it is kept.
    fn load_song(&self, song: &Value, spec: &QuerySpec, filter: &ArtistFilter) -> Result<Option<SongRecord>> {
        let entry = extract_song_data(song, &spec.query);
        let data_title = &entry.record.data_title;

        match filter.exclusion_filter(&entry.record) {
            Verdict::Keep => {
                self.audit.record(data_title)?;
                tracing::debug!("{data_title}");
                Ok(Some(entry.record))
            }
            Verdict::Reject(reason) => {
                self.audit.record(&format!("{data_title}: excluded"))?;
                tracing::debug!("Excluding {data_title}: {reason}");
                Ok(None)
            }
        }
    }
}

/// Append the buffered records and empty the buffer.
fn flush(path: &Path, bucket: &mut Vec<SongRecord>) -> Result<()> {
    let rows: Vec<Vec<String>> = bucket.drain(..).map(|r| r.to_row()).collect();
    csv::append_rows(path, &rows)
}

/// Relevant `(artist name, api path)` pairs among search hits.
pub fn filter_artists(hits: &[Value], query: &str, filter: &ArtistFilter) -> BTreeSet<(String, String)> {
    hits.iter()
        .filter_map(|hit| {
            let entry = extract_song_data(&hit["result"], query);
            match filter.exclusion_filter(&entry.record) {
                Verdict::Keep => Some((entry.record.artist, entry.api_path)),
                Verdict::Reject(reason) => {
                    tracing::warn!("Skipping search hit {}: {reason}", entry.record.data_title);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn search_hits_dedupe_by_artist() {
        let hit = |title: &str, artist: &str, id: u32| {
            json!({"result": {
                "title": title,
                "primary_artist": {"name": artist, "api_path": format!("/artists/{id}")}
            }})
        };
        let hits = vec![
            hit("Mask Off", "Future", 2197),
            hit("Low Life", "Future", 2197),
            hit("Hotline Bling", "Drake", 130),
            hit("Mask Off (Instrumental)", "Future", 2197),
        ];
        let filter = ArtistFilter::new(&QuerySpec::new("Future"), true);
        let artists = filter_artists(&hits, "future", &filter);
        assert_eq!(
            artists.into_iter().collect::<Vec<_>>(),
            vec![("Future".to_string(), "/artists/2197".to_string())]
        );
    }
}
