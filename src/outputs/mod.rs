//! Output generation.
//!
//! - [`json`]: writes the aggregated articles to a single JSON array file
//!
//! # Output Structure
//!
//! ```text
//! output/
//! └── articles.json   # [{ "title", "content", "source", "url", "fetched_at" }, ...]
//! ```

pub mod json;
