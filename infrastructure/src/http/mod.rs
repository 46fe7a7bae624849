//! HTTP adapters

pub mod fetcher;
