//! Dynamic parameter model: entities, key convention, validation, and
//! effectiveness rules.

pub mod effective;
pub mod entities;
pub mod key;
pub mod validation;
