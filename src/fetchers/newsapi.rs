//! News API fetcher.
//!
//! Reads a [News API](https://newsapi.org) top-headlines payload either from
//! a local fixture (mock mode) or from the live endpoint. Both paths converge
//! on [`normalize`], which turns the payload into [`Article`] records.
//!
//! Live mode requires an API key. A missing key is reported by
//! [`NewsApiFetcher::new`] as [`PipelineError::Config`], before any request
//! is made; every later failure is logged and yields no articles.

use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use crate::config::NewsApiSettings;
use crate::error::{PipelineError, Result};
use crate::fetchers::Fetcher;
use crate::models::{Article, NewsApiResponse};
use crate::utils::{timestamp_now, truncate_for_log};

const DEFAULT_SOURCE: &str = "newsapi";

/// Where the payload comes from; chosen once at construction.
#[derive(Debug, Clone)]
enum Mode {
    Mock {
        fixture: PathBuf,
    },
    Live {
        client: Client,
        endpoint: String,
        category: String,
        api_key: String,
    },
}

#[derive(Debug, Clone)]
pub struct NewsApiFetcher {
    mode: Mode,
}

impl NewsApiFetcher {
    /// Build a fetcher from settings and an optional credential.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when `settings.use_mock` is false and
    /// `api_key` is absent or blank, or if the HTTP client cannot be built.
    pub fn new(settings: &NewsApiSettings, api_key: Option<String>) -> Result<Self> {
        if settings.use_mock {
            return Ok(Self {
                mode: Mode::Mock {
                    fixture: settings.mock_fixture.clone(),
                },
            });
        }

        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("NEWS_API_KEY missing".to_string()))?;
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            mode: Mode::Live {
                client,
                endpoint: settings.endpoint.clone(),
                category: settings.category.clone(),
                api_key,
            },
        })
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, Mode::Mock { .. })
    }

    async fn read_from_mock(fixture: &Path) -> Vec<Article> {
        info!(path = %fixture.display(), "Reading News API data from mock fixture");
        let parsed: Result<NewsApiResponse> = async {
            let raw = fs::read_to_string(fixture).await?;
            Ok(serde_json::from_str(&raw)?)
        }
        .await;

        match parsed {
            Ok(payload) => normalize(payload),
            Err(e) => {
                error!(path = %fixture.display(), error = %e, "Failed to read mock file");
                Vec::new()
            }
        }
    }

    async fn fetch_from_api(
        client: &Client,
        endpoint: &str,
        category: &str,
        api_key: &str,
    ) -> Vec<Article> {
        info!(%endpoint, %category, "Fetching data from News API");
        let result: Result<Vec<Article>> = async {
            let response = client
                .get(endpoint)
                .query(&[("category", category), ("apiKey", api_key)])
                .send()
                .await
                // the request URL carries the API key
                .map_err(reqwest::Error::without_url)?;

            let status = response.status();
            if status != reqwest::StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                error!(
                    status = status.as_u16(),
                    body = %truncate_for_log(&body, 300),
                    "News API request failed"
                );
                return Err(PipelineError::HttpStatus {
                    status: status.as_u16(),
                });
            }

            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            let payload: NewsApiResponse = serde_json::from_str(&body)?;
            Ok(normalize(payload))
        }
        .await;

        result.unwrap_or_else(|e| {
            if !matches!(e, PipelineError::HttpStatus { .. }) {
                error!(error = %e, "News API request failed");
            }
            Vec::new()
        })
    }
}

impl Fetcher for NewsApiFetcher {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    #[instrument(level = "info", skip_all, fields(mock = self.is_mock()))]
    async fn fetch(&self) -> Vec<Article> {
        let articles = match &self.mode {
            Mode::Mock { fixture } => Self::read_from_mock(fixture).await,
            Mode::Live {
                client,
                endpoint,
                category,
                api_key,
            } => Self::fetch_from_api(client, endpoint, category, api_key).await,
        };
        info!(count = articles.len(), "Fetched News API articles");
        articles
    }
}

/// Convert a News API payload into articles.
///
/// A payload whose `status` is not `"ok"` is rejected as a whole. Empty
/// strings count as absent when choosing between `content` and
/// `description`.
pub fn normalize(payload: NewsApiResponse) -> Vec<Article> {
    if payload.status.as_deref() != Some("ok") {
        error!(status = ?payload.status, "Invalid News API response");
        return Vec::new();
    }

    let fetched_at = timestamp_now();
    let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());

    payload
        .articles
        .into_iter()
        .map(|item| Article {
            title: item.title.unwrap_or_default(),
            content: non_empty(item.content)
                .or_else(|| non_empty(item.description))
                .unwrap_or_default(),
            source: item
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            url: item.url.unwrap_or_default(),
            fetched_at: fetched_at.clone(),
        })
        .collect()
}
