//! Plain-text audit trail of catalog decisions.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use fs_err as fs;

use crate::error::Result;

/// Append-only log with one line per processed or excluded song.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Log at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `logger_YYYYMMDDHHMM.txt` inside `dir`, stamped with the current local time.
    pub fn timestamped(dir: &Path) -> Self {
        let stamp = Local::now().format("%Y%m%d%H%M");
        Self::new(dir.join(format!("logger_{stamp}.txt")))
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line.
    pub fn record(&self, line: &str) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
