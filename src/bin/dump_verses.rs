//! Parse one lyrics file and print its verse rows, for checking header
//! classification by eye.
//!
//! Usage: cargo run --bin dump_verses -- <path/to/song.txt>

use lyricflow::verses::{RuleClassifier, SongFileProcessor};

fn main() -> anyhow::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_verses <lyrics file>");
        std::process::exit(2);
    };

    let processor = SongFileProcessor::new("", ".", RuleClassifier::new());
    let rows = processor.process_one_file(std::path::Path::new(&path))?;

    if let Some(first) = rows.first() {
        let song = &first.song;
        println!(
            "=== {} | {} | {} | feat: {} | id: {} ===",
            song.song_title, song.song_artist, song.release_date, song.features, song.song_id
        );
    }

    for row in &rows {
        println!(
            "--- #{} [{}] type={:?} artist={} ---",
            row.verse_index,
            row.verse_header.as_deref().unwrap_or("-"),
            row.verse_type,
            row.verse_artist.as_deref().unwrap_or("-"),
        );
        println!("{}\n", row.verse_text);
    }
    println!("{} verses", rows.len());
    Ok(())
}
