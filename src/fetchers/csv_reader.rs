//! CSV export reader.
//!
//! Reads a UTF-8 CSV file with a header row and maps the `Headline` and
//! `Body` columns onto [`Article`] title and content. Other columns are
//! ignored and column order does not matter.

use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::error::Result;
use crate::fetchers::Fetcher;
use crate::models::Article;
use crate::utils::timestamp_now;

const TITLE_COLUMN: &str = "Headline";
const BODY_COLUMN: &str = "Body";
const SOURCE_LABEL: &str = "csv";

#[derive(Debug, Clone)]
pub struct CsvFetcher {
    file_path: PathBuf,
}

impl CsvFetcher {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl Fetcher for CsvFetcher {
    fn name(&self) -> &str {
        "CSV"
    }

    #[instrument(level = "info", skip_all, fields(path = %self.file_path.display()))]
    async fn fetch(&self) -> Vec<Article> {
        let content = match fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!(path = %self.file_path.display(), "CSV file not found");
                return Vec::new();
            }
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "Failed to read CSV file");
                return Vec::new();
            }
        };

        match parse_articles(&content, &timestamp_now()) {
            Ok(articles) => {
                info!(count = articles.len(), "Read CSV articles");
                articles
            }
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "Failed to parse CSV file");
                Vec::new()
            }
        }
    }
}

/// Convert CSV text into articles sharing one `fetched_at`.
///
/// Short rows and missing columns produce empty strings. Rows the reader
/// cannot decode at all are skipped with a warning.
pub fn parse_articles(content: &str, fetched_at: &str) -> Result<Vec<Article>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let title_idx = headers.iter().position(|h| h == TITLE_COLUMN);
    let body_idx = headers.iter().position(|h| h == BODY_COLUMN);
    if title_idx.is_none() || body_idx.is_none() {
        warn!(?headers, "CSV header is missing Headline or Body column");
    }

    let field = |record: &::csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut articles = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row + 1, error = %e, "Skipping unreadable CSV row");
                continue;
            }
        };
        articles.push(Article {
            title: field(&record, title_idx),
            content: field(&record, body_idx),
            source: SOURCE_LABEL.to_string(),
            url: String::new(),
            fetched_at: fetched_at.to_string(),
        });
    }

    Ok(articles)
}
