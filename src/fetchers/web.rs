//! Blog index scraper.
//!
//! Scrapes post titles and links from the [Python blog](https://blog.python.org/)
//! index page. Only the index is read, so every [`Article`] it produces has
//! empty `content`.
//!
//! # Retry Strategy
//!
//! - At most 3 attempts
//! - After each failed attempt `n`, sleep `2^n` backoff units (2, 4, 8 by
//!   default), no jitter
//! - Timeouts and other failures are retried alike, only the log differs
//! - A page that downloads but has no recognizable posts is not retried
//!
//! # Selectors
//!
//! 1. `h3.post-title` headings, first anchor in each
//! 2. Fallback: every anchor inside `#index-by-category`
//! 3. Neither matched: the page layout changed, reported on the
//!    `article_ingest::alert` target
//!
//! Post titles are normalized: each text node of the anchor is trimmed and
//! the non-empty pieces are joined with a single space.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::client::{HttpPageClient, PageClient};
use crate::config::ScraperSettings;
use crate::error::{PipelineError, Result};
use crate::fetchers::Fetcher;
use crate::models::Article;
use crate::utils::timestamp_now;

static POST_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.post-title").expect("valid post title selector"));
static FALLBACK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#index-by-category").expect("valid fallback selector"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));

/// A `(title, href)` pair pulled from the index page.
pub type Post = (String, String);

/// Which selector produced the posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostExtraction {
    Primary(Vec<Post>),
    Fallback(Vec<Post>),
    StructureChanged,
}

impl PostExtraction {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            PostExtraction::Primary(posts) | PostExtraction::Fallback(posts) => posts,
            PostExtraction::StructureChanged => Vec::new(),
        }
    }
}

/// Extract posts from an index page, trying each selector in turn.
pub fn extract_posts(html: &str) -> PostExtraction {
    let document = Html::parse_document(html);

    let primary: Vec<Post> = document
        .select(&POST_TITLE_SELECTOR)
        .filter_map(|heading| heading.select(&ANCHOR_SELECTOR).next())
        .map(anchor_to_post)
        .collect();
    if !primary.is_empty() {
        return PostExtraction::Primary(primary);
    }

    if let Some(section) = document.select(&FALLBACK_SELECTOR).next() {
        let fallback: Vec<Post> = section.select(&ANCHOR_SELECTOR).map(anchor_to_post).collect();
        if !fallback.is_empty() {
            return PostExtraction::Fallback(fallback);
        }
    }

    PostExtraction::StructureChanged
}

/// Normalized anchor text (trimmed text nodes joined by one space) and `href`.
fn anchor_to_post(anchor: ElementRef<'_>) -> Post {
    let title = anchor
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let href = anchor.value().attr("href").unwrap_or("").to_string();
    (title, href)
}

#[derive(Debug, Clone)]
pub struct WebScraperFetcher<C = HttpPageClient> {
    client: C,
    url: String,
    host: String,
    max_articles: usize,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl WebScraperFetcher<HttpPageClient> {
    /// Build a scraper that fetches over HTTP with the configured User-Agent and timeout.
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = HttpPageClient::new(&settings.user_agent, settings.timeout())?;
        Self::with_client(settings, client)
    }
}

impl<C: PageClient> WebScraperFetcher<C> {
    /// Build a scraper around any [`PageClient`].
    ///
    /// The `source` label of every produced article is the host of
    /// `settings.url`. A URL that does not parse or has no host is a
    /// [`PipelineError::Config`].
    pub fn with_client(settings: &ScraperSettings, client: C) -> Result<Self> {
        let parsed = Url::parse(&settings.url)
            .map_err(|e| PipelineError::Config(format!("invalid scraper URL {}: {e}", settings.url)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| PipelineError::Config(format!("scraper URL has no host: {}", settings.url)))?
            .to_string();

        Ok(Self {
            client,
            url: settings.url.clone(),
            host,
            max_articles: settings.max_articles,
            max_attempts: settings.max_attempts,
            backoff_unit: settings.backoff_unit(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Delay after failed attempt `attempt` (1-based): `2^attempt` units.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(1u32 << attempt.min(16))
    }

    fn posts_to_articles(&self, extraction: PostExtraction, fetched_at: &str) -> Vec<Article> {
        match &extraction {
            PostExtraction::Primary(posts) => {
                info!(found = posts.len(), "Matched primary post selector");
            }
            PostExtraction::Fallback(posts) => {
                warn!(found = posts.len(), host = %self.host, "Using fallback selector");
            }
            PostExtraction::StructureChanged => {
                error!(
                    target: "article_ingest::alert",
                    host = %self.host,
                    url = %self.url,
                    "HTML structure changed; no post selector matched"
                );
            }
        }

        extraction
            .into_posts()
            .into_iter()
            .take(self.max_articles)
            .map(|(title, url)| Article {
                title,
                content: String::new(),
                source: self.host.clone(),
                url,
                fetched_at: fetched_at.to_string(),
            })
            .collect()
    }
}

impl<C: PageClient> Fetcher for WebScraperFetcher<C> {
    fn name(&self) -> &str {
        "Web"
    }

    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn fetch(&self) -> Vec<Article> {
        let fetched_at = timestamp_now();
        let total_t0 = Instant::now();

        for attempt in 1..=self.max_attempts {
            match self.client.get_text(&self.url).await {
                Ok(html) => {
                    let articles = self.posts_to_articles(extract_posts(&html), &fetched_at);
                    info!(count = articles.len(), attempt, "Scraped blog index");
                    return articles;
                }
                Err(e) if e.is_timeout() => {
                    warn!(attempt, max = self.max_attempts, "Timeout fetching blog index");
                }
                Err(e) => {
                    error!(attempt, max = self.max_attempts, error = %e, "Web scraping failed");
                }
            }

            let delay = self.backoff_delay(attempt);
            warn!(attempt, ?delay, "Backing off before next attempt");
            sleep(delay).await;
        }

        error!(
            attempts = self.max_attempts,
            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
            "Web scraping exhausted retries"
        );
        Vec::new()
    }
}
