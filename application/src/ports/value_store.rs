//! Map store port
//!
//! Defines the interface to the external key/value store. Reads are cheap;
//! writes are costly and can fail, which is why the reconciler always reads
//! before writing.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the store, uninterpreted by the core.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store transport error: {0}")]
    Transport(String),

    #[error("Store rejected the operation: {0}")]
    Rejected(String),

    #[error("Invalid store address: {0}")]
    InvalidAddress(String),
}

/// The external key/value Map store.
///
/// Implementations (adapters) live in the infrastructure layer. Transaction
/// mechanics such as signing or fee estimation are the adapter's concern and
/// never leak through this interface.
#[async_trait]
pub trait ValueStore: Send + Sync {
    /// Read the current value for `key`.
    ///
    /// An absent key reads as the empty string, matching the store's
    /// default-value convention.
    async fn read(&self, key: &str) -> Result<String, StoreError>;

    /// Write `value` under `key`. Writing the empty string deletes the key.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
