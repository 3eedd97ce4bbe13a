//! Run configuration.
//!
//! Configuration is read once at startup, from built-in defaults, an optional
//! YAML file, and CLI flags (in increasing precedence), then handed to each
//! fetcher's constructor. Nothing below reads the environment.
//!
//! ```yaml
//! output_path: output/articles.json
//! csv_path: input/sample_data.csv
//! newsapi:
//!   use_mock: true
//!   mock_fixture: mock/newsapi_temp.json
//! scraper:
//!   url: https://blog.python.org/
//!   max_articles: 5
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the aggregated JSON array is written.
    pub output_path: PathBuf,
    /// CSV export to ingest.
    pub csv_path: PathBuf,
    pub newsapi: NewsApiSettings,
    pub scraper: ScraperSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output/articles.json"),
            csv_path: PathBuf::from("input/sample_data.csv"),
            newsapi: NewsApiSettings::default(),
            scraper: ScraperSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a YAML configuration file; fields it omits keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&raw)?;
        info!("Loaded configuration file");
        Ok(config)
    }
}

/// News API fetcher settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsApiSettings {
    /// Read the local fixture instead of calling the endpoint.
    pub use_mock: bool,
    pub mock_fixture: PathBuf,
    pub endpoint: String,
    pub category: String,
    pub timeout_secs: u64,
}

impl Default for NewsApiSettings {
    fn default() -> Self {
        Self {
            use_mock: true,
            mock_fixture: PathBuf::from("mock/newsapi_temp.json"),
            endpoint: "https://newsapi.org/v2/top-headlines".to_string(),
            category: "technology".to_string(),
            timeout_secs: 5,
        }
    }
}

impl NewsApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Blog index scraper settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_articles: usize,
    pub max_attempts: u32,
    /// Length of one backoff unit; attempt `n` sleeps `2^n` units.
    pub backoff_unit_ms: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            url: "https://blog.python.org/".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 5,
            max_articles: 5,
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }
}
