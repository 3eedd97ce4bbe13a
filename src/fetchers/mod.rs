//! Source fetchers that produce normalized [`Article`] records.
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | News API | [`newsapi`] | JSON over HTTPS, or a local fixture | Live mode needs an API key |
//! | CSV export | [`csv_reader`] | Local file | Needs `Headline` and `Body` columns |
//! | Python blog | [`web`] | HTML scraping | Retries with exponential backoff |
//!
//! Every fetcher contains its own failures: anything that goes wrong while
//! fetching is logged and the source contributes an empty `Vec`. The only
//! error a fetcher surfaces is a configuration error from its constructor.

use crate::models::Article;

pub mod csv_reader;
pub mod newsapi;
pub mod web;

pub use self::csv_reader::CsvFetcher;
pub use self::newsapi::NewsApiFetcher;
pub use self::web::WebScraperFetcher;

/// A source of articles.
pub trait Fetcher {
    /// Short label used in logs and the run summary.
    fn name(&self) -> &str;

    /// Fetch and normalize this source's articles. Never fails.
    async fn fetch(&self) -> Vec<Article>;
}
