//! Conversion between rows and flat text, plus the filesystem edges.
//!
//! [`load_text`] and [`save_text`] are pure; the remaining helpers wrap
//! `std::fs` with error context.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::editor::Row;

/// Split `raw` on `'\n'` into rows indexed `0..n`.
///
/// A trailing newline yields a trailing empty row; nothing is trimmed.
pub fn load_text(raw: &str) -> Vec<Row> {
    raw.split('\n')
        .enumerate()
        .map(|(index, line)| Row::new(index, line))
        .collect()
}

/// Join row contents with `'\n'`.
///
/// Inverse of [`load_text`]: `save_text(&load_text(raw)) == raw`.
pub fn save_text(rows: &[Row]) -> String {
    let mut text = String::with_capacity(rows.iter().map(|row| row.content.len() + 1).sum());
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&row.content);
    }
    text
}

/// Read a UTF-8 text file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not UTF-8.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `text` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Download-style name for an unnamed buffer, e.g. `file-2024-05-01_13-45-09.txt`.
pub fn suggested_file_name(now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("file-{stamp}.txt")
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
