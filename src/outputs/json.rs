//! JSON output for the aggregated articles.
//!
//! The file is a pretty-printed array (two-space indent) in UTF-8. Non-ASCII
//! text is written as-is rather than `\u` escaped. The parent directory is
//! created when missing.

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::Article;
use crate::utils::ensure_writable_dir;

/// Write `articles` as a JSON array to `output_path`.
#[instrument(level = "info", skip_all, fields(path = %output_path.display(), count = articles.len()))]
pub async fn write_articles(articles: &[Article], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        info!(dir = %parent.display(), "Ensuring output directory exists");
        ensure_writable_dir(parent).await?;
    }

    let json = serde_json::to_string_pretty(articles)?;
    fs::write(output_path, json).await?;
    info!("Wrote articles JSON");

    Ok(())
}
