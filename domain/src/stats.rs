//! Run statistics

use std::fmt;

/// Counters accumulated over one reconciliation run.
///
/// Created at the start of a run, mutated only by the reconciler, and
/// rendered once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Values written to the store.
    pub stored: u32,
    /// Values already matching the store; no write attempted.
    pub unchanged: u32,
    /// Items not applied: not yet effective, or superseded by a later one.
    pub skipped: u32,
    /// Malformed parameters and failed writes.
    pub failed: u32,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stored: {}, Unchanged: {}, Skipped: {}, Failed: {}",
            self.stored, self.unchanged, self.skipped, self.failed
        )
    }
}
