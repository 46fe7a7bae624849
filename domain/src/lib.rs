//! Domain layer for mapsync
//!
//! This crate contains the parameter model and the reconciliation rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Dynamic parameters
//!
//! A configuration document maps parameter names to a description plus a
//! time-ordered list of candidate values. Only names carrying the
//! `DYNAMIC_` prefix participate in reconciliation; at any instant at most
//! one candidate per parameter is "in effect".
//!
//! ## Winning item
//!
//! Among the items whose `effective_from` has passed, the one with the
//! latest activation instant wins (items without a timestamp rank
//! earliest). The engine applies only the winner, which keeps a
//! reconciliation run idempotent even for out-of-order documents.

pub mod param;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use param::{
    entities::{Param, ParamItem, ParamValue, RawDocument},
    key::{DYNAMIC_PREFIX, is_dynamic_key},
    validation::ValidationError,
};
pub use source::{Environment, EnvironmentParseError, config_urls};
pub use stats::RunStats;
