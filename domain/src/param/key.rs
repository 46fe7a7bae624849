//! Recognized-parameter key convention.
//!
//! Configuration documents may carry arbitrary top-level entries; only keys
//! with the `DYNAMIC_` prefix are reconciled, everything else is ignored
//! without error.

/// Prefix a document key must carry to participate in reconciliation.
pub const DYNAMIC_PREFIX: &str = "DYNAMIC_";

/// Whether a top-level document key names a reconcilable parameter.
pub fn is_dynamic_key(key: &str) -> bool {
    key.starts_with(DYNAMIC_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_prefix_matches() {
        assert!(is_dynamic_key("DYNAMIC_MAX_JOBS"));
        assert!(is_dynamic_key("DYNAMIC_"));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert!(!is_dynamic_key("STATIC_MAX_JOBS"));
        assert!(!is_dynamic_key("dynamic_max_jobs"));
        assert!(!is_dynamic_key("comment"));
    }
}
