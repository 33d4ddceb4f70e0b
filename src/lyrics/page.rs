//! Lyrics page extraction and first-pass text repair.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::constants::fetch::{LYRICS_SELECTOR, SONG_ID_SELECTOR};
use crate::error::{Error, Result};

lazy_static! {
    static ref SPLIT_HEADER: Regex = Regex::new(r"(\[.+)\n(.+\])").unwrap();
}

/// What a lyrics page yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsPage {
    /// Site-internal song id; empty when the page does not carry one.
    pub song_id: String,
    /// Lyric text, one line per text node.
    pub lyrics: String,
}

/// Extract the song id and lyric text from a lyrics page.
///
/// Returns `Ok(None)` when the page has no lyrics container.
pub fn parse_lyrics_page(html: &str) -> Result<Option<LyricsPage>> {
    let id_selector = selector(SONG_ID_SELECTOR)?;
    let lyrics_selector = selector(LYRICS_SELECTOR)?;
    let document = Html::parse_document(html);

    let song_id = document
        .select(&id_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .and_then(|content| content.rsplit('/').next())
        .unwrap_or_default()
        .to_string();

    let blocks: Vec<String> = document
        .select(&lyrics_selector)
        .map(|container| {
            container
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    if blocks.is_empty() {
        return Ok(None);
    }

    Ok(Some(LyricsPage { song_id, lyrics: blocks.join("\n") }))
}

/// Rejoin a header split across two lines and pull a lone comma line back up.
pub fn repair_lyrics(lyrics: &str) -> String {
    let joined = SPLIT_HEADER.replace_all(lyrics, "${1} ${2}");
    joined.replace("\n,\n", ",\n")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::parse(format!("Invalid CSS selector {css:?}: {e:?}"), None))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const PAGE: &str = r#"<html><head>
        <meta property="twitter:app:url:iphone" content="genius://songs/2916584">
        </head><body>
        <div data-lyrics-container="true">[Intro]<br>Call it how it is<br><a href="/x"><span>Hendrix, I swear</span></a><br></div>
        <div class="footer">not lyrics</div>
        <div data-lyrics-container="true">[Chorus]<br>Mask on</div>
        </body></html>"#;

    #[test]
    fn extracts_id_and_lines() {
        let page = parse_lyrics_page(PAGE).unwrap().unwrap();
        assert_eq!(page.song_id, "2916584");
        assert_eq!(
            page.lyrics,
            "[Intro]\nCall it how it is\nHendrix, I swear\n[Chorus]\nMask on"
        );
    }

    #[test]
    fn no_container_is_none() {
        let html = "<html><body><div>Lyrics unavailable</div></body></html>";
        assert!(parse_lyrics_page(html).unwrap().is_none());
    }

    #[test]
    fn missing_meta_gives_empty_id() {
        let html = r#"<div data-lyrics-container="true">only line</div>"#;
        let page = parse_lyrics_page(html).unwrap().unwrap();
        assert_eq!(page.song_id, "");
        assert_eq!(page.lyrics, "only line");
    }

    #[test]
    fn repairs_split_header_and_comma() {
        assert_eq!(repair_lyrics("[Verse 1: Future\n& Drake]\nbars"), "[Verse 1: Future & Drake]\nbars");
        assert_eq!(repair_lyrics("Drake\n,\nFuture"), "Drake,\nFuture");
    }
}
