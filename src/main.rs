//! # Article Ingest
//!
//! A small ingestion pipeline that pulls article-like records from three
//! sources, normalizes them into one record shape, and writes a single JSON
//! file.
//!
//! ## Sources
//!
//! - News API top headlines (from a mock fixture by default, or live)
//! - A local CSV export with `Headline` and `Body` columns
//! - The Python blog index page, scraped with retry and selector fallback
//!
//! ## Usage
//!
//! ```sh
//! article_ingest
//! NEWS_API_KEY=... article_ingest --live -o ./output/articles.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: defaults, optional YAML file, CLI flags, `.env`
//! 2. **Fetching**: all three sources concurrently; each failure stays local
//!    to its source
//! 3. **Output**: one pretty-printed JSON array plus a summary on stdout

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod client;
mod config;
mod error;
mod fetchers;
mod models;
mod outputs;
mod pipeline;
#[cfg(test)]
mod test_support;
mod utils;

use cli::Cli;
use pipeline::Pipeline;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up NEWS_API_KEY and RUST_LOG from .env before anything reads them
    dotenv::dotenv().ok();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("article_ingest starting up");

    let args = Cli::parse();
    debug!(?args.config, live = args.live, "Parsed CLI arguments");

    let config = args.resolve_config()?;
    debug!(?config, "Resolved configuration");

    let pipeline = match Pipeline::from_config(&config, args.news_api_key.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(error = %e, "Invalid configuration; aborting");
            return Err(e.into());
        }
    };

    let summary = pipeline.run().await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total = summary.total(),
        output = %summary.output_path.display(),
        "Execution complete"
    );

    Ok(())
}
