//! Ports: interfaces the application layer requires from the outside world

pub mod config_fetcher;
pub mod value_store;
