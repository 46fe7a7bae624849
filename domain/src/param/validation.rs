//! Structural validation of raw parameter payloads

use super::entities::Param;
use thiserror::Error;

/// A parameter payload that failed structural validation.
///
/// Carries the offending document key so the reconciler can count the
/// failure and move on to sibling keys.
#[derive(Error, Debug)]
#[error("Invalid param format for {key}: {source}")]
pub struct ValidationError {
    /// The document key whose payload was malformed.
    pub key: String,
    #[source]
    source: serde_json::Error,
}

impl Param {
    /// Parse one raw document entry into a [`Param`].
    ///
    /// A payload is valid only if it has a string `description` and an
    /// `items` array whose elements each carry a scalar `value` and an
    /// optional RFC 3339 `effective_from`.
    pub fn parse(key: &str, raw: &serde_json::Value) -> Result<Param, ValidationError> {
        serde_json::from_value(raw.clone()).map_err(|source| ValidationError {
            key: key.to_string(),
            source,
        })
    }
}
