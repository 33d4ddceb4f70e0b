//! Turn Genius song JSON into catalog records.

use chrono::NaiveDate;
use serde_json::Value;

use crate::constants::catalog::NO_DATE;
use crate::types::SongRecord;

/// A catalog record plus the primary artist's API path, which is used for
/// artist resolution but never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The record as it will be written.
    pub record: SongRecord,
    /// e.g. `/artists/1421`.
    pub api_path: String,
}

/// Build a catalog entry from one song object. Missing fields become empty strings.
pub fn extract_song_data(song: &Value, query: &str) -> CatalogEntry {
    let text = |v: &Value| v.as_str().unwrap_or_default().to_string();

    let primary = &song["primary_artist"];
    let features = song["featured_artists"]
        .as_array()
        .map(|artists| {
            artists
                .iter()
                .map(|a| a["name"].as_str().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" / ")
        })
        .unwrap_or_default();

    let title = text(&song["title"]);
    let artist = text(&primary["name"]);
    let query = title_case(query);
    let data_title = SongRecord::make_data_title(&query, &artist, &title);

    CatalogEntry {
        record: SongRecord {
            title,
            artist,
            features,
            release_date: extract_date(song),
            lyrics_url: text(&song["url"]),
            query,
            data_title,
        },
        api_path: text(&primary["api_path"]),
    }
}

/// Release date as `YYYY-MM-DD`, trying the ISO field, then the date
/// components (missing parts become `00`), then the display date.
pub fn extract_date(song: &Value) -> String {
    if let Some(date) = song["release_date"].as_str().filter(|d| !d.trim().is_empty()) {
        return date.to_string();
    }

    if let Some(parts) = song
        .get("release_date_components")
        .filter(|c| c.as_object().is_some_and(|o| !o.is_empty())) {
        return [("year", 4), ("month", 2), ("day", 2)]
            .iter()
            .map(|(key, width)| date_component(&parts[*key], *width))
            .collect::<Vec<_>>()
            .join("-");
    }

    if let Some(shown) = song["release_date_for_display"].as_str() {
        match NaiveDate::parse_from_str(shown.trim(), "%B %d, %Y") {
            Ok(date) => return date.format("%Y-%m-%d").to_string(),
            Err(e) => tracing::debug!("Unparseable display date {shown:?}: {e}"),
        }
    }

    NO_DATE.to_string()
}

fn date_component(value: &Value, width: usize) -> String {
    match value {
        Value::Number(n) if n.as_u64().is_some_and(|v| v > 0) => {
            format!("{:0width$}", n.as_u64().unwrap_or_default())
        }
        Value::String(s) if !s.is_empty() && s != "0" => format!("{s:0>width$}"),
        _ => "00".to_string(),
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_record_fields() {
        let song = json!({
            "title": "Life Is Good",
            "url": "https://genius.com/Future-life-is-good-lyrics",
            "primary_artist": {"name": "Future", "api_path": "/artists/2197"},
            "featured_artists": [{"name": "Drake"}, {"name": "Lil Baby"}],
            "release_date": "2020-01-10"
        });
        let entry = extract_song_data(&song, "future");
        assert_eq!(entry.api_path, "/artists/2197");
        assert_eq!(entry.record.features, "Drake / Lil Baby");
        assert_eq!(entry.record.query, "Future");
        assert_eq!(entry.record.data_title, "Future-Future-Life Is Good");
        assert_eq!(entry.record.release_date, "2020-01-10");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry = extract_song_data(&json!({"primary_artist": {}}), "x");
        assert_eq!(entry.record.title, "");
        assert_eq!(entry.record.artist, "");
        assert_eq!(entry.record.features, "");
        assert_eq!(entry.record.release_date, NO_DATE);
    }

    #[test]
    fn date_from_components() {
        let song = json!({"release_date_components": {"year": 2017, "month": 2, "day": null}});
        assert_eq!(extract_date(&song), "2017-02-00");
    }

    #[test]
    fn date_from_display() {
        let song = json!({"release_date_for_display": "February 17, 2017"});
        assert_eq!(extract_date(&song), "2017-02-17");
    }

    #[test]
    fn empty_components_fall_through_to_display() {
        let song = json!({
            "release_date_components": {},
            "release_date_for_display": "February 17, 2017"
        });
        assert_eq!(extract_date(&song), "2017-02-17");
    }

    #[test]
    fn unparseable_display_date_is_no_date() {
        let song = json!({"release_date_for_display": "Spring 2017"});
        assert_eq!(extract_date(&song), NO_DATE);
    }

    #[test]
    fn iso_date_wins() {
        let song = json!({
            "release_date": "2016-04-29",
            "release_date_components": {"year": 2016, "month": 4, "day": 29},
            "release_date_for_display": "April 29, 2016"
        });
        assert_eq!(extract_date(&song), "2016-04-29");
    }

    #[test]
    fn no_date_sentinel() {
        assert_eq!(extract_date(&json!({"release_date_components": null})), NO_DATE);
        assert_eq!(extract_date(&json!({"release_date_for_display": "sometime"})), NO_DATE);
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("kendrick lamar"), "Kendrick Lamar");
        assert_eq!(title_case("JAY-Z"), "Jay-Z");
        assert_eq!(title_case("21 savage"), "21 Savage");
    }
}
