//! Error types for the ingestion pipeline.
//!
//! Only [`PipelineError::Config`] and output-write failures are expected to
//! leave the runner. Every other variant is produced and consumed inside a
//! single fetcher, which logs it and contributes an empty result instead.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status error: {status}")]
    HttpStatus { status: u16 },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PipelineError {
    /// Whether this failure is a transport timeout rather than any other error.
    pub fn is_timeout(&self) -> bool {
        match self {
            PipelineError::Timeout(_) => true,
            PipelineError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        assert!(PipelineError::Timeout(Duration::from_secs(5)).is_timeout());
        assert!(!PipelineError::HttpStatus { status: 503 }.is_timeout());
        assert!(!PipelineError::Config("missing".into()).is_timeout());
    }

    #[test]
    fn test_config_error_message() {
        let e = PipelineError::Config("NEWS_API_KEY missing".into());
        assert_eq!(e.to_string(), "Configuration error: NEWS_API_KEY missing");
    }
}
