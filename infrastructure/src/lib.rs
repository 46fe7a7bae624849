//! Infrastructure layer for mapsync
//!
//! Adapters for the application-layer ports: an HTTP document fetcher and a
//! JSON-RPC Map store client, plus the settings loader.

pub mod http;
pub mod settings;
pub mod store;

pub use http::fetcher::HttpConfigFetcher;
pub use settings::{Settings, SettingsError, SettingsLoader};
pub use store::rpc::RpcMapStore;
