//! Application layer for mapsync
//!
//! Defines the ports the reconciler depends on (the external Map store and
//! the document fetcher) and the use case that drives a sync run.
//! Implementations of the ports live in the infrastructure layer.

pub mod ports;
pub mod use_cases;

pub use ports::config_fetcher::{ConfigFetcher, FetchError};
pub use ports::value_store::{StoreError, ValueStore};
pub use use_cases::sync_params::{SyncInput, SyncParamsUseCase, SyncResult};
