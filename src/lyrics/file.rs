//! On-disk lyrics file format shared by the fetcher and the verse parser.
//!
//! ```text
//! SONG TITLE: <title>
//! RELEASE DATE: <date>
//! PRIMARY ARTIST: <artist>
//! FEATURED ARTISTS: <features>
//! SONG ID: <id>
//! ======
//! <raw lyrics>
//! ```

use crate::constants::lyrics_file::{
    FEATURED_ARTISTS, PRIMARY_ARTIST, RELEASE_DATE, SEPARATOR, SONG_ID, SONG_TITLE,
};
use crate::types::{SongInfo, SongRecord};

/// Render the metadata header, separator and body for one song.
pub fn render(record: &SongRecord, song_id: &str, lyrics: &str) -> String {
    let header = [
        (SONG_TITLE, record.title.as_str()),
        (RELEASE_DATE, record.release_date.as_str()),
        (PRIMARY_ARTIST, record.artist.as_str()),
        (FEATURED_ARTISTS, record.features.as_str()),
        (SONG_ID, song_id),
    ]
    .iter()
    .map(|(label, value)| format!("{label}: {value}"))
    .collect::<Vec<_>>()
    .join("\n");

    format!("{header}\n{SEPARATOR}\n{lyrics}")
}

/// Split file text into `(song_info, song_lyrics)` at the first separator.
///
/// Newlines hugging the separator are dropped from both sides. Returns
/// `None` when the separator is missing.
pub fn split_sections(text: &str) -> Option<(&str, &str)> {
    let (info, lyrics) = text.split_once(SEPARATOR)?;
    Some((info.trim_end_matches(['\n', '\r']), lyrics.trim_start_matches(['\n', '\r'])))
}

/// Parse the `KEY: value` header lines.
///
/// Known labels map to their field; an unknown label falls back to the
/// field at the same line position. Missing fields stay empty.
pub fn parse_song_info(song_info: &str) -> SongInfo {
    let mut info = SongInfo::default();
    let lines = song_info
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    for (position, line) in lines.enumerate() {
        let Some((label, value)) = line.split_once(": ").or_else(|| line.split_once(':')) else {
            continue;
        };
        let slot = match label.trim().to_uppercase().as_str() {
            SONG_TITLE => 0,
            RELEASE_DATE => 1,
            PRIMARY_ARTIST => 2,
            FEATURED_ARTISTS => 3,
            SONG_ID => 4,
            _ => position,
        };
        let value = value.to_string();
        match slot {
            0 => info.song_title = value,
            1 => info.release_date = value,
            2 => info.song_artist = value,
            3 => info.features = value,
            4 => info.song_id = value,
            _ => tracing::debug!("Ignoring extra header line {line:?}"),
        }
    }

    info
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn record() -> SongRecord {
        SongRecord {
            title: "Mask Off".into(),
            artist: "Future".into(),
            features: String::new(),
            release_date: "2017-02-17".into(),
            ..SongRecord::default()
        }
    }

    #[test]
    fn render_then_parse() {
        let text = render(&record(), "2916584", "[Intro]\nCall it how it is");
        assert!(text.starts_with("SONG TITLE: Mask Off\nRELEASE DATE: 2017-02-17\n"));
        assert!(text.contains("FEATURED ARTISTS: \nSONG ID: 2916584\n======\n[Intro]"));

        let (info, lyrics) = split_sections(&text).unwrap();
        assert_eq!(lyrics, "[Intro]\nCall it how it is");

        let info = parse_song_info(info);
        assert_eq!(info.song_title, "Mask Off");
        assert_eq!(info.song_artist, "Future");
        assert_eq!(info.features, "");
        assert_eq!(info.song_id, "2916584");
    }

    #[test]
    fn missing_separator() {
        assert!(split_sections("SONG TITLE: X\nno separator here").is_none());
    }

    #[test]
    fn value_keeps_later_colons() {
        let info = parse_song_info("SONG TITLE: Intro: Part 2\nSONG ID: 9");
        assert_eq!(info.song_title, "Intro: Part 2");
        assert_eq!(info.song_id, "9");
    }

    #[test]
    fn unlabeled_lines_use_position() {
        let info = parse_song_info("NAME: X\nDATE: 2020-01-01\nBY: Y\nFEAT: \nID: 1");
        assert_eq!(info.song_title, "X");
        assert_eq!(info.release_date, "2020-01-01");
        assert_eq!(info.song_artist, "Y");
        assert_eq!(info.song_id, "1");
    }
}
