//! Parameter entities and value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw configuration document as fetched from one source URL: top-level
/// keys mapped to still-unvalidated parameter payloads.
pub type RawDocument = serde_json::Map<String, serde_json::Value>;

/// A scalar parameter value.
///
/// Documents are loosely typed; this closes the set of scalar kinds the
/// engine accepts. The [`fmt::Display`] impl is the single canonical
/// stringification, used both for diffing against the store and as the
/// write payload, so a value compares equal to its own round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean, stringified as `true` / `false`.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Arbitrary string.
    String(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

/// One scheduled value for a parameter. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamItem {
    /// The value to store once the item is in effect.
    pub value: ParamValue,
    /// Activation instant (inclusive). `None` means always effective.
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,
}

impl ParamItem {
    /// Whether this item is in effect at `now`.
    ///
    /// The boundary is inclusive: an item becomes effective exactly at its
    /// `effective_from` instant.
    pub fn is_effective(&self, now: DateTime<Utc>) -> bool {
        match self.effective_from {
            None => true,
            Some(from) => from <= now,
        }
    }
}

/// A named, time-versioned configuration parameter.
///
/// `items` is trusted to be non-decreasing by `effective_from` (untimed
/// items typically first), but winner selection does not rely on that
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Human-readable description of the parameter.
    pub description: String,
    /// Candidate values in document order.
    pub items: Vec<ParamItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_display_canonical() {
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
        assert_eq!(ParamValue::Bool(false).to_string(), "false");
        assert_eq!(ParamValue::Integer(42).to_string(), "42");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::String("plain".into()).to_string(), "plain");
    }

    #[test]
    fn test_param_value_deserializes_untagged() {
        let v: ParamValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, ParamValue::Bool(true));

        let v: ParamValue = serde_json::from_str("17").unwrap();
        assert_eq!(v, ParamValue::Integer(17));

        let v: ParamValue = serde_json::from_str("0.25").unwrap();
        assert_eq!(v, ParamValue::Float(0.25));

        let v: ParamValue = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(v, ParamValue::String("17".into()));
    }

    #[test]
    fn test_effectiveness_boundary_is_inclusive() {
        let now: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        let at = |t: &str| ParamItem {
            value: ParamValue::Integer(1),
            effective_from: Some(t.parse().unwrap()),
        };

        assert!(at("2026-01-01T00:00:00Z").is_effective(now));
        assert!(at("2025-12-31T23:59:59Z").is_effective(now));
        assert!(!at("2026-01-01T00:00:00.000001Z").is_effective(now));
    }

    #[test]
    fn test_untimed_item_is_always_effective() {
        let item = ParamItem {
            value: ParamValue::String("default".into()),
            effective_from: None,
        };
        assert!(item.is_effective("1970-01-01T00:00:00Z".parse().unwrap()));
    }
}
