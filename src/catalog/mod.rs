//! Catalog collection.
//!
//! Resolves a queried artist through the Genius API, pages their songs,
//! filters out irrelevant ones and appends the rest to a per-artist CSV.

/// Genius API client and the endpoint trait the collector depends on
pub mod api;
/// Paging and batched CSV output
pub mod collector;
/// Song JSON to catalog record conversion
pub mod extract;
/// Relevance filter
pub mod filter;

pub use api::{CatalogApi, GeniusClient, SongPage};
pub use collector::{CollectReport, SongDataPuller};
pub use filter::{ArtistFilter, Rejection, Verdict};
