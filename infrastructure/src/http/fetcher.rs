//! HTTP document fetcher: retrieve a configuration document over HTTPS

use async_trait::async_trait;
use mapsync_application::{ConfigFetcher, FetchError};
use mapsync_domain::RawDocument;

/// User-Agent sent with every document request. GitHub's raw endpoint
/// rejects requests without one.
const USER_AGENT: &str = "backend-developers-ltd mapsync";

/// [`ConfigFetcher`] adapter backed by a shared [`reqwest::Client`].
pub struct HttpConfigFetcher {
    client: reqwest::Client,
}

impl HttpConfigFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpConfigFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                url: url.to_string(),
                reason: format!(
                    "HTTP error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        parse_document(url, &body)
    }
}

/// Parse a response body into a raw document.
///
/// The body must be a JSON object; anything else is a malformed payload,
/// not a transport failure.
fn parse_document(url: &str, body: &str) -> Result<RawDocument, FetchError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(FetchError::Malformed {
            url: url.to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
