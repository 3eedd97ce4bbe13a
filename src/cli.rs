//! Command-line interface definitions for Article Ingest.
//!
//! Every flag is optional; with none given the pipeline runs offline against
//! the bundled CSV and mock News API fixture.

use clap::Parser;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Command-line arguments for the Article Ingest pipeline.
///
/// # Examples
///
/// ```sh
/// # Offline run with defaults
/// article_ingest
///
/// # Live News API call
/// NEWS_API_KEY=... article_ingest --live
///
/// # Settings from a file, output elsewhere
/// article_ingest -c pipeline.yaml -o /tmp/articles.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file to ingest
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Mock News API fixture read when not running live
    #[arg(long)]
    pub mock_fixture: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Call the live News API instead of reading the mock fixture
    #[arg(long)]
    pub live: bool,

    /// Blog index page to scrape
    #[arg(long)]
    pub blog_url: Option<String>,

    /// News API key (required with --live)
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,
}

impl Cli {
    /// Build the run configuration: defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(csv_path) = &self.csv_path {
            config.csv_path = csv_path.clone();
        }
        if let Some(fixture) = &self.mock_fixture {
            config.newsapi.mock_fixture = fixture.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if self.live {
            config.newsapi.use_mock = false;
        }
        if let Some(url) = &self.blog_url {
            config.scraper.url = url.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["article_ingest"]);
        assert!(!cli.live);
        assert!(cli.config.is_none());

        let config = cli.resolve_config().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "article_ingest",
            "--csv-path",
            "/tmp/in.csv",
            "-o",
            "/tmp/out/articles.json",
            "--live",
            "--blog-url",
            "https://example.org/blog",
        ]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.csv_path, PathBuf::from("/tmp/in.csv"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out/articles.json"));
        assert!(!config.newsapi.use_mock);
        assert_eq!(config.scraper.url, "https://example.org/blog");
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pipeline.yaml");
        std::fs::write(&path, "csv_path: from_file.csv\noutput_path: file_out.json\n").unwrap();

        let cli = Cli::parse_from([
            "article_ingest",
            "-c",
            path.to_str().unwrap(),
            "--csv-path",
            "from_flag.csv",
        ]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.csv_path, PathBuf::from("from_flag.csv"));
        assert_eq!(config.output_path, PathBuf::from("file_out.json"));
    }
}
