//! Core records passed between pipeline stages.
//!
//! Each stage owns one of these on its output side: the collector emits
//! [`SongRecord`] rows, the fetcher persists [`SongInfo`] headers, and the
//! parser emits [`VerseRow`] rows.

use serde::{Deserialize, Serialize};

/// What to collect: a search term plus the names that identify the artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free-text search term.
    pub query: String,
    /// Canonical artist name; falls back to `query`.
    #[serde(default)]
    pub artist: Option<String>,
    /// Other names the artist is credited under.
    #[serde(default, alias = "alternate_names")]
    pub alts: Vec<String>,
    /// Credited names that always disqualify a song.
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Genius artist id; skips search when present.
    #[serde(default, alias = "known_id")]
    pub rg_id: Option<u64>,
}

impl QuerySpec {
    /// Build a spec for a plain search term.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }

    /// The artist this query is about.
    pub fn effective_artist(&self) -> &str {
        self.artist
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&self.query)
    }

    /// Lowercased names accepted as the queried artist.
    pub fn accepted_names(&self) -> Vec<String> {
        self.alts
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.effective_artist()))
            .map(str::to_lowercase)
            .collect()
    }

    /// Lowercased names that are always rejected.
    pub fn excluded_names(&self) -> Vec<String> {
        self.excludes.iter().map(|e| e.to_lowercase()).collect()
    }

    /// Default per-artist directory name, e.g. `"Kendrick Lamar"` → `kendrick_lamar`.
    pub fn dir_name(&self) -> String {
        self.effective_artist()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }
}

/// One retained song from the artist catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Song title.
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    /// Featured artists joined with `" / "`.
    pub features: String,
    /// `YYYY-MM-DD` or `NO DATE`.
    pub release_date: String,
    /// Lyrics page URL.
    pub lyrics_url: String,
    /// Search term, title-cased.
    pub query: String,
    /// `query-artist-title` join key.
    pub data_title: String,
}

impl SongRecord {
    /// Column names of the catalog CSV, in order.
    pub const COLUMNS: [&'static str; 7] =
        ["title", "artist", "features", "release_date", "url", "query", "data_title"];

    /// Build the `query-artist-title` join key.
    pub fn make_data_title(query: &str, artist: &str, title: &str) -> String {
        [query, artist, title].join("-")
    }

    /// Cells in [`Self::COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.artist.clone(),
            self.features.clone(),
            self.release_date.clone(),
            self.lyrics_url.clone(),
            self.query.clone(),
            self.data_title.clone(),
        ]
    }

    /// Rebuild a record from catalog CSV cells.
    ///
    /// Rows carrying an extra leading index column are accepted and the
    /// first cell dropped.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let cells = match row.len() {
            7 => row,
            8 => &row[1..],
            _ => return None,
        };
        Some(Self {
            title: cells[0].clone(),
            artist: cells[1].clone(),
            features: cells[2].clone(),
            release_date: cells[3].clone(),
            lyrics_url: cells[4].clone(),
            query: cells[5].clone(),
            data_title: cells[6].clone(),
        })
    }

    /// Lyrics file name for this song: `artist-title.txt`, `/` → `.`.
    pub fn file_name(&self) -> String {
        format!("{}-{}", self.artist, self.title).replace('/', ".") + ".txt"
    }
}

/// Song-level metadata from a lyrics file header, copied onto every verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInfo {
    /// Song title.
    pub song_title: String,
    /// Release date as stored by the collector.
    pub release_date: String,
    /// Primary artist.
    pub song_artist: String,
    /// Featured artists.
    pub features: String,
    /// Site-internal song id.
    pub song_id: String,
}

/// One verse of one song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRow {
    /// Song-level metadata.
    #[serde(flatten)]
    pub song: SongInfo,
    /// Lyrics with bracketed headers removed.
    pub verse_text: String,
    /// Position within the song, 0-based.
    pub verse_index: usize,
    /// Bracket interior of the verse header, if any.
    pub verse_header: Option<String>,
    /// Section types found in the header, space-joined.
    pub verse_type: String,
    /// Performer; the primary artist when the header names none.
    pub verse_artist: Option<String>,
}

impl VerseRow {
    /// Column names of the verses CSV, in order.
    pub const COLUMNS: [&'static str; 10] = [
        "song_title",
        "release_date",
        "song_artist",
        "features",
        "song_id",
        "verse_text",
        "verse_index",
        "verse_header",
        "verse_type",
        "verse_artist",
    ];

    /// Cells in [`Self::COLUMNS`] order; `None` becomes an empty cell.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.song.song_title.clone(),
            self.song.release_date.clone(),
            self.song.song_artist.clone(),
            self.song.features.clone(),
            self.song.song_id.clone(),
            self.verse_text.clone(),
            self.verse_index.to_string(),
            self.verse_header.clone().unwrap_or_default(),
            self.verse_type.clone(),
            self.verse_artist.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn effective_artist_falls_back_to_query() {
        let spec = QuerySpec::new("Kendrick Lamar");
        assert_eq!(spec.effective_artist(), "Kendrick Lamar");
        assert_eq!(spec.dir_name(), "kendrick_lamar");

        let spec = QuerySpec {
            artist: Some("JAY-Z".into()),
            alts: vec!["Jay Z".into()],
            ..QuerySpec::new("Jay")
        };
        assert_eq!(spec.accepted_names(), vec!["jay z", "jay-z"]);
    }

    #[test]
    fn query_spec_accepts_long_field_names() {
        let spec: QuerySpec = serde_json::from_str(
            r#"{"query": "future", "alternate_names": ["Future Hendrix"], "known_id": 2197}"#,
        )
        .unwrap();
        assert_eq!(spec.alts, vec!["Future Hendrix"]);
        assert_eq!(spec.rg_id, Some(2197));
    }

    #[test]
    fn song_record_row_round_trip_keeps_join_key() {
        let record = SongRecord {
            title: "Mask Off".into(),
            artist: "Future".into(),
            features: String::new(),
            release_date: "2017-02-17".into(),
            lyrics_url: "https://genius.com/Future-mask-off-lyrics".into(),
            query: "Future".into(),
            data_title: SongRecord::make_data_title("Future", "Future", "Mask Off"),
        };
        let back = SongRecord::from_row(&record.to_row()).unwrap();
        assert_eq!(back.data_title, "Future-Future-Mask Off");

        let mut indexed = vec!["0".to_string()];
        indexed.extend(record.to_row());
        assert_eq!(SongRecord::from_row(&indexed).unwrap(), record);
    }

    #[test]
    fn file_name_is_filesystem_safe() {
        let record = SongRecord {
            artist: "AC/DC".into(),
            title: "T.N.T".into(),
            ..SongRecord::default()
        };
        assert_eq!(record.file_name(), "AC.DC-T.N.T.txt");
    }
}
