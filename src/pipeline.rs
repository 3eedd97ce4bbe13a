//! End-to-end pipeline run.
//!
//! A [`Pipeline`] owns one fetcher per source. [`Pipeline::run`] fetches all
//! three concurrently, concatenates the results in a fixed order (News API,
//! CSV, web), writes the JSON output, and prints a [`RunSummary`] to stdout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetchers::{CsvFetcher, Fetcher, NewsApiFetcher, WebScraperFetcher};
use crate::outputs::json;

/// Per-source counts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub newsapi: usize,
    pub csv: usize,
    pub web: usize,
    pub output_path: PathBuf,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.newsapi + self.csv + self.web
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Fetched {} articles from NewsAPI, {} from CSV, {} from Web Scraper.",
            self.newsapi, self.csv, self.web
        )?;
        writeln!(f, "NewsAPI: {}", self.newsapi)?;
        writeln!(f, "CSV: {}", self.csv)?;
        writeln!(f, "Web: {}", self.web)?;
        writeln!(f, "Total articles saved: {}", self.total())?;
        write!(f, "Output file: {}", self.output_path.display())
    }
}

pub struct Pipeline<A, C, W> {
    api: A,
    csv: C,
    web: W,
    output_path: PathBuf,
}

impl Pipeline<NewsApiFetcher, CsvFetcher, WebScraperFetcher> {
    /// Build the standard three-source pipeline.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when live News API mode is selected
    /// without `api_key`, or when the scraper URL is invalid.
    pub fn from_config(config: &PipelineConfig, api_key: Option<String>) -> Result<Self> {
        let api = NewsApiFetcher::new(&config.newsapi, api_key)?;
        let csv = CsvFetcher::new(&config.csv_path);
        let web = WebScraperFetcher::new(&config.scraper)?;
        info!(
            mock = api.is_mock(),
            csv = %config.csv_path.display(),
            scraper_host = web.host(),
            "Built fetchers"
        );
        Ok(Self::new(api, csv, web, &config.output_path))
    }
}

impl<A: Fetcher, C: Fetcher, W: Fetcher> Pipeline<A, C, W> {
    pub fn new(api: A, csv: C, web: W, output_path: &Path) -> Self {
        Self {
            api,
            csv,
            web,
            output_path: output_path.to_path_buf(),
        }
    }

    /// Fetch every source, write the output file, and print the summary.
    ///
    /// Source failures never surface here; only a failure to write the output
    /// file is returned as an error.
    #[instrument(level = "info", skip_all, fields(output = %self.output_path.display()))]
    pub async fn run(&self) -> Result<RunSummary> {
        let t0 = Instant::now();

        let (api_articles, csv_articles, web_articles) =
            tokio::join!(self.api.fetch(), self.csv.fetch(), self.web.fetch());

        let summary = RunSummary {
            newsapi: api_articles.len(),
            csv: csv_articles.len(),
            web: web_articles.len(),
            output_path: self.output_path.clone(),
        };
        info!(
            newsapi = summary.newsapi,
            csv = summary.csv,
            web = summary.web,
            sources = ?[self.api.name(), self.csv.name(), self.web.name()],
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched all sources"
        );

        let articles = vec![api_articles, csv_articles, web_articles]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        json::write_articles(&articles, &self.output_path).await?;

        println!("{summary}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PageClient;
    use crate::config::{NewsApiSettings, ScraperSettings};
    use crate::models::Article;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "articles": [
            {
                "source": { "name": "Wired" },
                "title": "API headline",
                "description": "API description",
                "url": "https://example.com/api"
            }
        ]
    }"#;

    const BLOG_HTML: &str = r#"
        <h3 class="post-title"><a href="https://blog.python.org/one">Web one</a></h3>
        <h3 class="post-title"><a href="https://blog.python.org/two">Web two</a></h3>
    "#;

    struct StaticPage(&'static str);

    impl PageClient for StaticPage {
        async fn get_text(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Finishes last but must still be listed first.
    struct SlowFetcher;

    impl Fetcher for SlowFetcher {
        fn name(&self) -> &str {
            "Slow"
        }

        async fn fetch(&self) -> Vec<Article> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            vec![Article {
                title: "slow".to_string(),
                content: String::new(),
                source: "slow".to_string(),
                url: String::new(),
                fetched_at: "t".to_string(),
            }]
        }
    }

    #[tokio::test]
    async fn test_end_to_end_order_and_counts() {
        let tmp = tempfile::tempdir().unwrap();
        let csv_path = tmp.path().join("sample_data.csv");
        std::fs::write(&csv_path, "Headline,Body\nCSV headline,CSV body\n").unwrap();
        let fixture_path = tmp.path().join("newsapi_temp.json");
        std::fs::write(&fixture_path, FIXTURE).unwrap();
        let output_path = tmp.path().join("output").join("articles.json");

        let api = NewsApiFetcher::new(
            &NewsApiSettings {
                use_mock: true,
                mock_fixture: fixture_path,
                ..NewsApiSettings::default()
            },
            None,
        )
        .unwrap();
        let csv = CsvFetcher::new(&csv_path);
        let web =
            WebScraperFetcher::with_client(&ScraperSettings::default(), StaticPage(BLOG_HTML)).unwrap();

        let summary = Pipeline::new(api, csv, web, &output_path).run().await.unwrap();

        assert_eq!((summary.newsapi, summary.csv, summary.web), (1, 1, 2));
        assert_eq!(summary.total(), 4);
        let printed = summary.to_string();
        assert!(printed.contains("Fetched 1 articles from NewsAPI, 1 from CSV, 2 from Web Scraper."));
        assert!(printed.contains("Total articles saved: 4"));

        let written: Vec<Article> =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        let titles: Vec<&str> = written.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["API headline", "CSV headline", "Web one", "Web two"]);
        assert_eq!(written[0].content, "API description");
        assert_eq!(written[0].source, "Wired");
        assert_eq!(written[1].source, "csv");
        assert_eq!(written[2].source, "blog.python.org");
        assert_eq!(written[3].url, "https://blog.python.org/two");
    }

    #[tokio::test]
    async fn test_order_is_independent_of_completion() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = tmp.path().join("articles.json");
        let csv = CsvFetcher::new(tmp.path().join("missing.csv"));
        let web =
            WebScraperFetcher::with_client(&ScraperSettings::default(), StaticPage(BLOG_HTML)).unwrap();

        let summary = Pipeline::new(SlowFetcher, csv, web, &output_path).run().await.unwrap();
        assert_eq!((summary.newsapi, summary.csv, summary.web), (1, 0, 2));

        let written: Vec<Article> =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(written[0].title, "slow");
        assert_eq!(written[1].title, "Web one");
    }

    #[tokio::test]
    async fn test_all_sources_empty_still_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = tmp.path().join("out").join("articles.json");

        let api = NewsApiFetcher::new(
            &NewsApiSettings {
                mock_fixture: tmp.path().join("missing.json"),
                ..NewsApiSettings::default()
            },
            None,
        )
        .unwrap();
        let csv = CsvFetcher::new(tmp.path().join("missing.csv"));
        let web = WebScraperFetcher::with_client(
            &ScraperSettings::default(),
            StaticPage("<html><body><p>redesigned</p></body></html>"),
        )
        .unwrap();

        let summary = Pipeline::new(api, csv, web, &output_path).run().await.unwrap();

        assert_eq!(summary.total(), 0);
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "[]");
    }

    #[test]
    fn test_from_config_live_without_key_fails() {
        let mut config = PipelineConfig::default();
        config.newsapi.use_mock = false;

        assert!(Pipeline::from_config(&config, None).is_err());
        assert!(Pipeline::from_config(&config, Some("key".into())).is_ok());
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            newsapi: 3,
            csv: 2,
            web: 5,
            output_path: PathBuf::from("output/articles.json"),
        };
        assert_eq!(
            summary.to_string(),
            "Fetched 3 articles from NewsAPI, 2 from CSV, 5 from Web Scraper.\n\
             NewsAPI: 3\nCSV: 2\nWeb: 5\nTotal articles saved: 10\n\
             Output file: output/articles.json"
        );
    }
}
