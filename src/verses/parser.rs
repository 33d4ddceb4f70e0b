//! Split lyrics files into verse rows and aggregate them per artist.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use fs_err as fs;
use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use crate::constants::paths::VERSES_SUFFIX;
use crate::constants::verses::{NO_HEADER, NO_LYRICS, PRODUCED_BY};
use crate::csv;
use crate::error::{Error, Result};
use crate::lyrics::file::{parse_song_info, split_sections};
use crate::types::{SongInfo, VerseRow};
use crate::verses::classify::{EntityLabel, HeaderClassifier};
use crate::verses::normalize::preprocess_text;

lazy_static! {
    /// A bracketed span with at least three characters inside.
    static ref HEADER: Regex = Regex::new(r"\[.{3,}\]").unwrap();
}

/// Outcome of parsing every lyrics file of one artist.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Lyrics files seen.
    pub files: usize,
    /// Verse rows written.
    pub verses: usize,
    /// Files that could not be parsed, with the reason.
    pub failures: Vec<(PathBuf, Error)>,
    /// Where the verses CSV was written.
    pub output: PathBuf,
}

/// A verse before header classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVerse {
    /// Position within the song.
    pub verse_index: usize,
    /// Block text with headers removed.
    pub verse_text: String,
    /// Bracket interior of the first header, if any.
    pub verse_header: Option<String>,
}

/// Verse parser for one artist's lyrics directory.
///
/// Holds its header classifier for its whole lifetime; nothing is cached
/// between headers.
pub struct SongFileProcessor<C> {
    artist: String,
    base_path: PathBuf,
    classifier: C,
}

impl<C: HeaderClassifier> SongFileProcessor<C> {
    /// Create a parser for `base_path/artist`.
    pub fn new(artist: impl Into<String>, base_path: impl Into<PathBuf>, classifier: C) -> Self {
        Self {
            artist: artist.into(),
            base_path: base_path.into(),
            classifier,
        }
    }

    /// Directory holding the artist's lyrics files.
    pub fn artist_dir(&self) -> PathBuf {
        self.base_path.join(&self.artist)
    }

    /// Path of the aggregated verses CSV.
    pub fn output_path(&self) -> PathBuf {
        self.artist_dir().join(format!("{}{VERSES_SUFFIX}", self.artist))
    }

    /// Parse every `.txt` file of the artist and write one verses CSV.
    ///
    /// Files that fail to parse are logged and listed in the report; the
    /// remaining files are still written.
    pub fn process_all_files(&self) -> Result<ParseReport> {
        let dir = self.artist_dir();
        if !dir.is_dir() {
            return Err(Error::io(
                std::io::Error::new(std::io::ErrorKind::NotFound, "lyrics directory not found"),
                dir,
            ));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();

        let mut report = ParseReport { files: files.len(), output: self.output_path(), ..ParseReport::default() };
        let mut rows = Vec::new();

        for path in files {
            match self.process_one_file(&path) {
                Ok(verses) if verses.is_empty() => {
                    tracing::debug!("No verses in {}", path.display());
                }
                Ok(verses) => {
                    rows.extend(verses.iter().map(VerseRow::to_row));
                }
                Err(e) => {
                    tracing::error!("Failed to parse {}: {e}", path.display());
                    report.failures.push((path, e));
                }
            }
        }

        report.verses = rows.len();
        csv::write_table(&report.output, &VerseRow::COLUMNS, &rows)?;
        tracing::info!(
            "Wrote {} verses from {} files to {}",
            report.verses,
            report.files,
            report.output.display()
        );
        Ok(report)
    }

    /// Parse one lyrics file into verse rows.
    pub fn process_one_file(&self, path: &Path) -> Result<Vec<VerseRow>> {
        let text = fs::read_to_string(path)?;
        let (info, raw) = process_song(&text).map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
            other => other,
        })?;
        Ok(self.make_output_rows(&info, raw))
    }

    /// Parse file text that is already in memory.
    pub fn parse_text(&self, text: &str) -> Result<Vec<VerseRow>> {
        let (info, raw) = process_song(text)?;
        Ok(self.make_output_rows(&info, raw))
    }

    /// Classify a header into `(verse_type, verse_artist)`.
    ///
    /// A missing header is classified as the `NO HEADER` placeholder. An
    /// artist shorter than two characters or starting with "produced by"
    /// (any case) is dropped.
    pub fn process_header(&self, verse_header: Option<&str>) -> (String, Option<String>) {
        let spans = self.classifier.classify(verse_header.unwrap_or(NO_HEADER));

        let verse_type = spans
            .iter()
            .filter(|s| s.label == EntityLabel::VerseType)
            .map(|s| s.text.replace(':', ""))
            .collect::<Vec<_>>()
            .join(" ");

        let verse_artist = spans
            .iter()
            .find(|s| s.label == EntityLabel::Artist)
            .map(|s| s.text.clone())
            .filter(|a| a.chars().count() >= 2 && !a.to_lowercase().starts_with(PRODUCED_BY));

        (verse_type, verse_artist)
    }

    /// Classify headers, back-fill artists, drop `NO LYRICS` verses and strip
    /// a leading newline from each verse.
    pub fn make_output_rows(&self, info: &SongInfo, verses: Vec<RawVerse>) -> Vec<VerseRow> {
        verses
            .into_iter()
            .filter_map(|raw| {
                let (verse_type, verse_artist) = self.process_header(raw.verse_header.as_deref());
                let verse_text = strip_leading_break(&raw.verse_text);
                if verse_text.trim() == NO_LYRICS {
                    return None;
                }
                Some(VerseRow {
                    song: info.clone(),
                    verse_text,
                    verse_index: raw.verse_index,
                    verse_header: raw.verse_header,
                    verse_type,
                    verse_artist: verse_artist.or_else(|| Some(info.song_artist.clone())),
                })
            })
            .collect()
    }
}

/// Normalize, split at the separator and cut the lyrics into raw verses.
pub fn process_song(text: &str) -> Result<(SongInfo, Vec<RawVerse>)> {
    let text = preprocess_text(text);
    let (song_info, song_lyrics) = split_sections(&text)
        .ok_or_else(|| Error::parse("missing header/body separator", None))?;

    let info = parse_song_info(song_info);
    let verses = split_verses(song_lyrics)
        .into_iter()
        .enumerate()
        .map(|(verse_index, block)| RawVerse {
            verse_index,
            verse_text: strip_headers(block),
            verse_header: extract_header(block),
        })
        .collect();

    Ok((info, verses))
}

/// Blank-line separated blocks, in order.
pub fn split_verses(song_lyrics: &str) -> Vec<&str> {
    song_lyrics.split("\n\n").collect()
}

/// Interior of the first bracketed span of three or more characters.
pub fn extract_header(verse: &str) -> Option<String> {
    HEADER
        .find(verse)
        .map(|m| m.as_str().replace(['[', ']'], ""))
}

/// The block with every bracketed span of three or more characters removed.
pub fn strip_headers(verse: &str) -> String {
    HEADER.replace_all(verse, "").into_owned()
}

/// Drop one leading `\n`, then one leading escaped newline (`\` + `\n`).
fn strip_leading_break(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let text = text.strip_prefix("\\\n").unwrap_or(text);
    text.to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::verses::classify::{EntitySpan, RuleClassifier};

    /// Returns canned spans regardless of input.
    struct Canned(Vec<EntitySpan>);

    impl HeaderClassifier for Canned {
        fn classify(&self, _text: &str) -> Vec<EntitySpan> {
            self.0.clone()
        }
    }

    fn processor() -> SongFileProcessor<RuleClassifier> {
        SongFileProcessor::new("y", "/tmp", RuleClassifier)
    }

    #[test]
    fn header_extraction() {
        assert_eq!(extract_header("[Verse 1: Drake]\nbars"), Some("Verse 1: Drake".into()));
        assert_eq!(extract_header("[ab]\nshort"), None);
        assert_eq!(extract_header("no header"), None);
        assert_eq!(strip_headers("[Chorus]\nhook [Drake] line"), "\nhook  line");
    }

    #[test]
    fn header_keeps_its_text_after_preprocessing() {
        let text = preprocess_text("x\n======\n[Verse 1: A,\nB]\nline");
        let (_, lyrics) = split_sections(&text).unwrap();
        assert_eq!(extract_header(lyrics).as_deref(), Some("Verse 1: A, B"));
    }

    #[test]
    fn missing_header_classifies_placeholder() {
        let (verse_type, verse_artist) = processor().process_header(None);
        assert_eq!(verse_type, "");
        assert_eq!(verse_artist, None);
    }

    #[test]
    fn produced_by_artist_is_discarded() {
        let canned = Canned(vec![EntitySpan::new("Produced by Metro Boomin", EntityLabel::Artist, 0, 4)]);
        let p = SongFileProcessor::new("y", "/tmp", canned);
        assert_eq!(p.process_header(Some("Produced by Metro Boomin")).1, None);

        let canned = Canned(vec![EntitySpan::new("produced by Metro Boomin", EntityLabel::Artist, 0, 4)]);
        let p = SongFileProcessor::new("y", "/tmp", canned);
        assert_eq!(p.process_header(Some("x")).1, None);
    }

    #[test]
    fn verse_types_join_and_lose_colons() {
        let canned = Canned(vec![
            EntitySpan::new("Chorus:", EntityLabel::VerseType, 0, 1),
            EntitySpan::new("Future", EntityLabel::Artist, 1, 2),
            EntitySpan::new("Outro", EntityLabel::VerseType, 2, 3),
            EntitySpan::new("Drake", EntityLabel::Artist, 3, 4),
        ]);
        let p = SongFileProcessor::new("y", "/tmp", canned);
        assert_eq!(
            p.process_header(Some("whatever")),
            ("Chorus Outro".to_string(), Some("Future".to_string()))
        );
    }

    #[test]
    fn single_character_artist_is_absent() {
        let canned = Canned(vec![EntitySpan::new("Y", EntityLabel::Artist, 0, 1)]);
        let p = SongFileProcessor::new("y", "/tmp", canned);
        assert_eq!(p.process_header(Some("Y")).1, None);
    }

    #[test]
    fn two_verse_song() {
        let text = "SONG TITLE: X\nRELEASE DATE: 2020-01-01\nPRIMARY ARTIST: Y\nFEATURED ARTISTS: \nSONG ID: 123\n======\n[Verse 1: Y]\nline one\nline two\n\n[Chorus]\nline three";
        let rows = processor().parse_text(text).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].verse_index, 0);
        assert_eq!(rows[0].verse_type, "Verse");
        assert_eq!(rows[0].verse_artist.as_deref(), Some("Y"));
        assert_eq!(rows[0].verse_text, "line one\nline two");
        assert_eq!(rows[0].verse_header.as_deref(), Some("Verse 1: Y"));

        assert_eq!(rows[1].verse_index, 1);
        assert_eq!(rows[1].verse_type, "Chorus");
        assert_eq!(rows[1].verse_artist.as_deref(), Some("Y"));
        assert_eq!(rows[1].verse_text, "line three");

        assert_eq!(rows[1].song.song_title, "X");
        assert_eq!(rows[1].song.release_date, "2020-01-01");
        assert_eq!(rows[1].song.song_id, "123");
    }

    #[test]
    fn named_performer_overrides_primary_artist() {
        let text = "SONG TITLE: Life Is Good\nRELEASE DATE: 2020-01-10\nPRIMARY ARTIST: Future\nFEATURED ARTISTS: Drake\nSONG ID: 5\n======\n[Verse 1: Drake]\nWorking on a weekend";
        let rows = processor().parse_text(text).unwrap();
        assert_eq!(rows[0].verse_artist.as_deref(), Some("Drake"));
        assert_eq!(rows[0].song.features, "Drake");
    }

    #[test]
    fn slash_joined_sections_keep_primary_artist() {
        let text = "SONG TITLE: X\nRELEASE DATE: NO DATE\nPRIMARY ARTIST: Future\nFEATURED ARTISTS: \nSONG ID: 1\n======\n[Bridge/Outro]\nla la\n\n[Verse/Hook: Drake]\nbars";
        let rows = processor().parse_text(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].verse_type, "Bridge Outro");
        assert_eq!(rows[0].verse_artist.as_deref(), Some("Future"));
        assert_eq!(rows[1].verse_type, "Verse Hook");
        assert_eq!(rows[1].verse_artist.as_deref(), Some("Drake"));
    }

    #[test]
    fn no_lyrics_sentinel_is_dropped_but_indexes_hold() {
        let text = "SONG TITLE: X\nRELEASE DATE: NO DATE\nPRIMARY ARTIST: Y\nFEATURED ARTISTS: \nSONG ID: 1\n======\nNO LYRICS\n\n[Outro]\nbye";
        let rows = processor().parse_text(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verse_index, 1);
        assert_eq!(rows[0].verse_text, "bye");
    }

    #[test]
    fn headerless_song_keeps_text() {
        let text = "SONG TITLE: X\nRELEASE DATE: NO DATE\nPRIMARY ARTIST: Y\nFEATURED ARTISTS: \nSONG ID: 1\n======\nfirst\n\nsecond";
        let rows = processor().parse_text(text).unwrap();
        let texts: Vec<_> = rows.iter().map(|r| r.verse_text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(rows.iter().all(|r| r.verse_header.is_none() && r.verse_type.is_empty()));
    }

    #[test]
    fn escaped_newline_is_stripped() {
        assert_eq!(strip_leading_break("\n\\\nline"), "line");
        assert_eq!(strip_leading_break("\nline"), "line");
        assert_eq!(strip_leading_break("line"), "line");
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = processor().parse_text("SONG TITLE: X\n[Verse]\nno body").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
