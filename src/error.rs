//! Pipeline error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Genius API error with status context
    #[error("Genius API error: {message}")]
    Api {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File or payload parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Malformed CSV artifact
    #[error("CSV error in {file:?}: {message}")]
    Csv {
        /// CSV file being read.
        file: PathBuf,
        /// Description of the problem.
        message: String,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an API error with HTTP status
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the GENIUS_TOKEN environment variable"),
            403 => Some("The token may lack access, or the request was blocked"),
            404 => Some("The requested artist or resource was not found"),
            429 => Some("Rate limited - raise API_COOLDOWN_SECS and try again"),
            500..=599 => Some("Genius server error - try again later"),
            _ => None,
        };
        Self::Api {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
