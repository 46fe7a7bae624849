//! Use cases: application services driving the domain

pub mod sync_params;
