//! Map store adapters

pub mod rpc;
