//! Small helpers for timestamps, log formatting, and output directories.

use chrono::Local;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::error::Result;

/// Format used for `fetched_at`: local time, ISO-8601, microsecond precision.
const FETCHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time formatted for [`crate::models::Article::fetched_at`].
pub fn timestamp_now() -> String {
    Local::now().naive_local().format(FETCHED_AT_FORMAT).to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory (and parents) if missing, then performs a write test
/// by creating and immediately deleting a scratch file. An already existing
/// directory is not an error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let scratch_path = path.join("..__write_check__");
    stdfs::File::create(&scratch_path)?;
    if let Err(e) = stdfs::remove_file(&scratch_path) {
        warn!(file = %scratch_path.display(), error = %e, "Failed to remove write-check file");
    }
    info!("Output directory is writable");
    Ok(())
}
