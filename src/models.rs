//! Data models shared by every source fetcher.
//!
//! - [`Article`]: the normalized record written to the output file
//! - [`NewsApiResponse`] / [`NewsApiArticle`]: the raw News API payload shape,
//!   used by both the mock fixture and the live endpoint

use serde::{Deserialize, Serialize};

/// A normalized article record.
///
/// Every fetcher produces this shape regardless of where the data came from.
/// Absent values are empty strings, never null, so the serialized JSON always
/// carries exactly the five string fields below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline or post title.
    pub title: String,
    /// Body text; empty for scraped index entries.
    pub content: String,
    /// Source label, e.g. `"csv"`, a publisher name, or a host name.
    pub source: String,
    /// Origin URL, empty when the source has none.
    pub url: String,
    /// Local timestamp captured by the fetcher that produced this record.
    pub fetched_at: String,
}

/// Top-level News API response.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub status: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

/// A single entry in the News API `articles` list.
#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub source: Option<NewsApiSource>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSource {
    pub name: Option<String>,
}
