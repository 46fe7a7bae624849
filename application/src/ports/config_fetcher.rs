//! Document fetcher port
//!
//! Defines how the application layer retrieves raw configuration documents.

use async_trait::async_trait;
use mapsync_domain::RawDocument;
use thiserror::Error;

/// Errors that can occur while fetching a configuration document.
///
/// Transport failures (connection errors, non-success statuses) are kept
/// apart from malformed payloads so callers can tell an unreachable source
/// from a broken one.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch config from {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Invalid JSON format in config from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

/// Fetches one raw configuration document per URL. No retries.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Fetch and parse the document published at `url`.
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;
}
