//! Relevance filter for catalog songs and search hits.

use std::collections::HashSet;
use std::fmt;

use crate::constants::catalog::EXCLUDED_PHRASES;
use crate::types::{QuerySpec, SongRecord};

/// Why a song was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A fixed exclusion phrase occurs in one of the song's fields.
    Phrase {
        /// Field that matched: `title`, `artist` or `features`.
        field: &'static str,
        /// The (lowercased) phrase.
        phrase: String,
    },
    /// A credited name is on the query's exclude list.
    ExcludedArtist(String),
    /// No credited name matches the queried artist.
    NoMatchingArtist,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phrase { field, phrase } => write!(f, "{field} contains {phrase:?}"),
            Self::ExcludedArtist(name) => write!(f, "credits excluded artist {name:?}"),
            Self::NoMatchingArtist => f.write_str("no credited artist matches the query"),
        }
    }
}

/// Filter decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Song is relevant.
    Keep,
    /// Song is dropped.
    Reject(Rejection),
}

impl Verdict {
    /// Whether the song passes.
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Decides whether a song belongs to the queried artist.
#[derive(Debug, Clone)]
pub struct ArtistFilter {
    accepted: Vec<String>,
    excluded: HashSet<String>,
    phrases: Vec<String>,
    allow_partial: bool,
}

impl ArtistFilter {
    /// Build the filter for one query.
    ///
    /// `allow_partial` enables matching an accepted name that is only a
    /// substring of a credited name.
    pub fn new(spec: &QuerySpec, allow_partial: bool) -> Self {
        Self {
            accepted: spec.accepted_names(),
            excluded: spec.excluded_names().into_iter().collect(),
            phrases: EXCLUDED_PHRASES.iter().map(|p| p.to_lowercase()).collect(),
            allow_partial,
        }
    }

    /// Apply the phrase, exclude and include rules, in that order.
    pub fn exclusion_filter(&self, song: &SongRecord) -> Verdict {
        for phrase in &self.phrases {
            for (field, value) in [
                ("title", &song.title),
                ("artist", &song.artist),
                ("features", &song.features),
            ] {
                if value.to_lowercase().contains(phrase.as_str()) {
                    return Verdict::Reject(Rejection::Phrase { field, phrase: phrase.clone() });
                }
            }
        }

        let credited = credited_names(song);

        if let Some(name) = credited.iter().find(|c| self.excluded.contains(*c)) {
            return Verdict::Reject(Rejection::ExcludedArtist(name.clone()));
        }

        let included = self.accepted.iter().any(|a| credited.contains(a));
        let overlaps = self.allow_partial
            && self
                .accepted
                .iter()
                .any(|a| credited.iter().any(|c| c.contains(a.as_str())));

        if included || overlaps {
            Verdict::Keep
        } else {
            Verdict::Reject(Rejection::NoMatchingArtist)
        }
    }
}

/// Lowercased primary artists (split on `" & "`) and featured artists (split on `" / "`).
pub fn credited_names(song: &SongRecord) -> HashSet<String> {
    let artist = song.artist.to_lowercase();
    let features = song.features.to_lowercase();
    artist
        .split(" & ")
        .chain(features.split(" / "))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
        .collect()
}
