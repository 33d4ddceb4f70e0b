//! Ordered text repairs applied to a scraped lyrics file before splitting.
//!
//! Each rule is a pure `&str -> String` transform. Rules run in the order of
//! [`RULES`]; later rules assume the whitespace left by earlier ones, so the
//! order is part of the contract.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NEWLINE_BEFORE_CLOSE: Regex = Regex::new(r"\n([\]\),])").unwrap();
    static ref NEWLINE_AFTER_OPEN: Regex = Regex::new(r"([\[\(])\n").unwrap();
    static ref NEWLINE_AFTER_JOINER: Regex = Regex::new(r"([,&])\n").unwrap();
    static ref HEADER_AFTER_TEXT: Regex = Regex::new(r"([^\n])\n\[").unwrap();
    static ref SPLIT_HEADER: Regex = Regex::new(r"(\[.+)\n(.+\])").unwrap();
    static ref NEWLINE_AFTER_CREDIT_MARK: Regex = Regex::new(r"([,&\(\[])\n").unwrap();
    static ref NEWLINE_BEFORE_CREDIT_MARK: Regex = Regex::new(r"\n([,&\)\]])").unwrap();
}

/// A named text repair.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in logs and tests.
    pub name: &'static str,
    /// The transform itself.
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The repair chain, in application order.
pub const RULES: [Rule; 9] = [
    Rule { name: "collapse_lone_uncertain", apply: collapse_lone_uncertain },
    Rule { name: "normalize_uncertain_brackets", apply: normalize_uncertain_brackets },
    Rule { name: "unescape_open_bracket", apply: unescape_open_bracket },
    Rule { name: "strip_newline_before_close", apply: strip_newline_before_close },
    Rule { name: "strip_newline_after_open", apply: strip_newline_after_open },
    Rule { name: "join_wrapped_credits", apply: join_wrapped_credits },
    Rule { name: "blank_line_before_header", apply: blank_line_before_header },
    Rule { name: "rejoin_split_header", apply: rejoin_split_header },
    Rule { name: "collapse_credit_newlines", apply: collapse_credit_newlines },
];

/// Run every rule of [`RULES`] over `text`, in order.
pub fn preprocess_text(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
}

/// `"line\n\n(?)"` → `"line\n(?)"`: an uncertainty marker scraped onto its own paragraph.
pub fn collapse_lone_uncertain(text: &str) -> String {
    text.replace("\n\n(?)", "\n(?)")
}

/// `[?]` → `(?)`, so the marker is never mistaken for a header bracket.
pub fn normalize_uncertain_brackets(text: &str) -> String {
    text.replace("[?]", "(?)")
}

/// `\[` → `[`.
pub fn unescape_open_bracket(text: &str) -> String {
    text.replace("\\[", "[")
}

/// Drop a newline directly before `]`, `)` or `,`.
pub fn strip_newline_before_close(text: &str) -> String {
    NEWLINE_BEFORE_CLOSE.replace_all(text, "${1}").into_owned()
}

/// Drop a newline directly after `[` or `(`.
pub fn strip_newline_after_open(text: &str) -> String {
    NEWLINE_AFTER_OPEN.replace_all(text, "${1}").into_owned()
}

/// `"A,\nB"` → `"A, B"`: credit lists wrapped after a comma or ampersand.
pub fn join_wrapped_credits(text: &str) -> String {
    NEWLINE_AFTER_JOINER.replace_all(text, "${1} ").into_owned()
}

/// A header that directly follows a text line gets a blank line before it.
pub fn blank_line_before_header(text: &str) -> String {
    HEADER_AFTER_TEXT.replace_all(text, "${1}\n\n[").into_owned()
}

/// `"[Verse 1: A\nB]"` → `"[Verse 1: A B]"`.
pub fn rejoin_split_header(text: &str) -> String {
    SPLIT_HEADER.replace_all(text, "${1} ${2}").into_owned()
}

/// Remove newlines that still touch `,`, `&` or a bracket, on either side.
pub fn collapse_credit_newlines(text: &str) -> String {
    let after = NEWLINE_AFTER_CREDIT_MARK.replace_all(text, "${1}");
    NEWLINE_BEFORE_CREDIT_MARK.replace_all(&after, "${1}").into_owned()
}
