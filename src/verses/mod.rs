//! Verse parsing.
//!
//! Splits stored song files into verses and labels each with its section
//! type and performing artist.

/// Verse header classification
pub mod classify;
/// Lyrics text cleanup rules
pub mod normalize;
/// Song file to verse rows
pub mod parser;

pub use classify::{EntityLabel, EntitySpan, HeaderClassifier, RuleClassifier};
pub use parser::{ParseReport, SongFileProcessor};
