//! `lyricflow` - song catalog, lyrics and verse pipeline.
//!
//! Three stages share a per-artist directory under a base path:
//! the catalog collector writes `{artist}_data.csv`, the lyrics fetcher
//! writes one text file per song, and the verse parser writes
//! `{artist}_verses.csv`.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod csv;
pub mod error;
pub mod lyrics;
pub mod types;
pub mod verses;
