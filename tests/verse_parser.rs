//! Directory-level verse parsing.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::fs;

use lyricflow::csv;
use lyricflow::error::Error;
use lyricflow::verses::{RuleClassifier, SongFileProcessor};

const GOOD: &str = "SONG TITLE: DNA.\n\
RELEASE DATE: 2017-04-14\n\
PRIMARY ARTIST: Kendrick Lamar\n\
FEATURED ARTISTS: \n\
SONG ID: 3035222\n\
======\n\
[Verse 1: Kendrick Lamar]\n\
I got, I got, I got, I got\n\
Loyalty, got royalty inside my DNA\n\
[Chorus: Kendrick Lamar & Rick\nRubin]\n\
I got loyalty\n\
[Produced by Mike WiLL Made-It]\n\
NO LYRICS";

const NO_SEPARATOR: &str = "SONG TITLE: Broken\nPRIMARY ARTIST: Nobody\nsome lyrics";

#[test]
fn parses_directory_and_reports_malformed_files() {
    let base = tempfile::tempdir().unwrap();
    let dir = base.path().join("kendrick_lamar");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Kendrick Lamar-DNA..txt"), GOOD).unwrap();
    fs::write(dir.join("Nobody-Broken.txt"), NO_SEPARATOR).unwrap();
    fs::write(dir.join("notes.md"), "not a song").unwrap();

    let processor = SongFileProcessor::new("kendrick_lamar", base.path(), RuleClassifier::new());
    let report = processor.process_all_files().unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.failures.len(), 1);
    let (path, err) = &report.failures[0];
    assert!(path.ends_with("Nobody-Broken.txt"));
    assert!(matches!(err, Error::Parse { file: Some(_), .. }));

    assert_eq!(report.output, dir.join("kendrick_lamar_verses.csv"));
    let table = csv::read_rows(&report.output).unwrap();
    let verses = &table[1..];
    assert_eq!(report.verses, verses.len());
    assert_eq!(verses.len(), 2);

    assert_eq!(verses[0][0], "DNA.");
    assert_eq!(verses[0][6], "0");
    assert_eq!(verses[0][7], "Verse 1: Kendrick Lamar");
    assert_eq!(verses[0][9], "Kendrick Lamar");
    assert_eq!(verses[0][5], "I got, I got, I got, I got\nLoyalty, got royalty inside my DNA");

    // header split across lines is rejoined before classification
    assert_eq!(verses[1][7], "Chorus: Kendrick Lamar & Rick Rubin");
    assert_eq!(verses[1][8], "Chorus");
    assert_eq!(verses[1][9], "Kendrick Lamar");
    assert_eq!(verses[1][6], "1");
}

#[test]
fn missing_artist_directory_is_an_error() {
    let base = tempfile::tempdir().unwrap();
    let processor = SongFileProcessor::new("nobody", base.path(), RuleClassifier::new());
    assert!(matches!(processor.process_all_files(), Err(Error::Io { .. })));
}
