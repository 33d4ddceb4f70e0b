//! Lyrics fetching.
//!
//! Downloads the lyrics page of every catalog entry and stores it as a
//! song file: a metadata block, a separator line and the lyrics body.

/// Per-artist download loop
pub mod fetcher;
/// Song file layout
pub mod file;
/// Lyrics page extraction
pub mod page;

pub use fetcher::{FetchReport, LyricsFetcher};
pub use page::LyricsPage;
