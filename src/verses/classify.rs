//! Verse header classification.
//!
//! A classifier turns a short header string such as `"Verse 1: Drake & Future"`
//! into labeled spans. The parser only consumes [`EntityLabel::VerseType`] and
//! [`EntityLabel::Artist`]; any model or rules engine producing those labels
//! can stand behind [`HeaderClassifier`].

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::verses::NO_HEADER;

/// Span label produced by a header classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    /// Section name: verse, chorus, hook, ...
    VerseType,
    /// Performing artist.
    Artist,
    /// Any other label a model may emit.
    Other(String),
}

impl EntityLabel {
    /// Wire name of the label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::VerseType => "VERSE_TYPE",
            Self::Artist => "ARTIST",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(s: &str) -> Self {
        match s {
            "VERSE_TYPE" => Self::VerseType,
            "ARTIST" => Self::Artist,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled piece of header text with token offsets (`end` exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    /// Covered text.
    pub text: String,
    /// Assigned label.
    pub label: EntityLabel,
    /// First token index.
    pub start: usize,
    /// One past the last token index.
    pub end: usize,
}

impl EntitySpan {
    /// Build a span.
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self { text: text.into(), label, start, end }
    }
}

/// Text classifier for verse headers.
///
/// Implementations are loaded once and reused read-only for every header.
pub trait HeaderClassifier {
    /// Label the spans of `text`, in text order.
    fn classify(&self, text: &str) -> Vec<EntitySpan>;
}

impl<T: HeaderClassifier + ?Sized> HeaderClassifier for &T {
    fn classify(&self, text: &str) -> Vec<EntitySpan> {
        (**self).classify(text)
    }
}

impl<T: HeaderClassifier + ?Sized> HeaderClassifier for Box<T> {
    fn classify(&self, text: &str) -> Vec<EntitySpan> {
        (**self).classify(text)
    }
}

/// Section keywords recognized by [`RuleClassifier`].
const SECTION_KEYWORDS: &[&str] = &[
    "verse", "chorus", "hook", "bridge", "intro", "outro", "pre-chorus", "prechorus",
    "post-chorus", "postchorus", "pre-hook", "post-hook", "refrain", "interlude",
    "breakdown", "skit", "part", "instrumental", "spoken", "drop", "break", "coda",
    "segue", "snippet", "freestyle", "tag",
];

lazy_static! {
    static ref CREDIT_JOINER: Regex = Regex::new(r"\s*(?:&|,|\+|/)\s*").unwrap();
}

/// Keyword-driven header classifier.
///
/// Splits a header at the first `:` (or ` - `) into a section part and a
/// credit part. Section keywords become `VERSE_TYPE` spans; the credit part
/// is split on `&`, `,`, `+` and `/` into `ARTIST` spans. A header with no
/// separator and no keyword is read as a bare credit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    /// Create the classifier.
    pub const fn new() -> Self {
        Self
    }
}

impl HeaderClassifier for RuleClassifier {
    fn classify(&self, text: &str) -> Vec<EntitySpan> {
        if text.trim().is_empty() || text.trim() == NO_HEADER {
            return Vec::new();
        }

        let (section, credits) = split_section(text);
        let mut spans = Vec::new();

        for (offset, token) in section_tokens(section) {
            let idx = token_index(text, offset);
            // "Bridge/Outro" names two sections in one token
            for part in token.split('/').filter(|p| is_section_keyword(p)) {
                spans.push(EntitySpan::new(part, EntityLabel::VerseType, idx, idx + 1));
            }
        }

        let credits = match credits {
            Some(c) => Some(c),
            None if spans.is_empty() => Some((0, text)),
            None => None,
        };

        if let Some((base, credit_text)) = credits {
            let mut pieces = Vec::new();
            let mut cursor = 0;
            for m in CREDIT_JOINER.find_iter(credit_text) {
                pieces.push((cursor, &credit_text[cursor..m.start()]));
                cursor = m.end();
            }
            pieces.push((cursor, &credit_text[cursor..]));

            for (rel, piece) in pieces {
                let trimmed = piece.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let lead = piece.len() - piece.trim_start().len();
                let start = token_index(text, base + rel + lead);
                let end = start + trimmed.split_whitespace().count();
                spans.push(EntitySpan::new(trimmed, EntityLabel::Artist, start, end));
            }
        }

        spans
    }
}

/// Split into `(section, Some((credit_byte_offset, credits)))`.
fn split_section(text: &str) -> (&str, Option<(usize, &str)>) {
    if let Some(pos) = text.find(':') {
        return (&text[..pos], Some((pos + 1, &text[pos + 1..])));
    }
    for sep in [" - ", " – ", " — "] {
        if let Some(pos) = text.find(sep) {
            let section = &text[..pos];
            if section.split_whitespace().flat_map(|t| t.split('/')).any(is_section_keyword) {
                return (section, Some((pos + sep.len(), &text[pos + sep.len()..])));
            }
        }
    }
    (text, None)
}

/// Whitespace tokens of `section` with their byte offsets.
///
/// `section` is always a prefix of the header, so offsets index the header too.
fn section_tokens(section: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, ch) in section.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push((s, &section[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push((s, &section[s..]));
    }
    tokens
}

fn is_section_keyword(token: &str) -> bool {
    let word = token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
        .to_lowercase();
    SECTION_KEYWORDS.contains(&word.as_str())
}

/// Whitespace-token index of the token starting at byte `offset`.
fn token_index(text: &str, offset: usize) -> usize {
    text[..offset].split_whitespace().count()
}
