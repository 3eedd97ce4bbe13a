//! HTTP page retrieval.
//!
//! The scraper talks to the network through the [`PageClient`] trait so its
//! retry loop and selector logic can run against canned pages:
//! - [`PageClient`]: core trait, fetch a URL and return the body text
//! - [`HttpPageClient`]: `reqwest` implementation with a fixed timeout and
//!   User-Agent

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::error::{PipelineError, Result};

/// Trait for async page retrieval.
pub trait PageClient {
    /// GET `url` and return the response body.
    ///
    /// Non-2xx responses are errors. Timeouts must be reported so that
    /// [`PipelineError::is_timeout`] returns `true`.
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// [`PageClient`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpPageClient {
    client: Client,
    timeout: Duration,
}

impl HttpPageClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl PageClient for HttpPageClient {
    #[instrument(level = "debug", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let res: Result<String> = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PipelineError::HttpStatus {
                    status: status.as_u16(),
                });
            }
            Ok(response.text().await?)
        }
        .await;
        let dt = t0.elapsed();

        match res {
            Ok(body) => {
                debug!(elapsed_ms = dt.as_millis() as u64, bytes = body.len(), "Fetched page");
                Ok(body)
            }
            Err(e) if e.is_timeout() => {
                debug!(elapsed_ms = dt.as_millis() as u64, "Page request timed out");
                Err(PipelineError::Timeout(self.timeout))
            }
            Err(e) => Err(e),
        }
    }
}
