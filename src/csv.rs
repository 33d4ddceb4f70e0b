//! Minimal CSV reading and writing for pipeline artifacts.
//!
//! Quote-aware in both directions so verse text with embedded newlines
//! and credit lists with commas survive a round trip.

use std::io::{self, Write};
use std::mem::take;
use std::path::Path;

use fs_err as fs;

use crate::error::{Error, Result};

/* ---------------- Parsing ---------------- */

/// Parse CSV text into rows of cells (quotes + CRLF tolerant).
///
/// Blank lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Read and parse a CSV file.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_rows(&text))
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if first {
            first = false;
        } else {
            write!(w, ",")?;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{escaped}\"")?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Append headerless rows to `path`, creating it and its parent directory if needed.
pub fn append_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    ensure_parent(path)?;
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = io::BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row).map_err(|e| Error::io(e, path.to_path_buf()))?;
    }
    out.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;
    Ok(())
}

/// Write a complete table with a header row, replacing any existing file.
pub fn write_table(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)?;
    let mut out = io::BufWriter::new(file);
    let header: Vec<String> = headers.iter().map(ToString::to_string).collect();
    write_row(&mut out, &header).map_err(|e| Error::io(e, path.to_path_buf()))?;
    for row in rows {
        write_row(&mut out, row).map_err(|e| Error::io(e, path.to_path_buf()))?;
    }
    out.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
