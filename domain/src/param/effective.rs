//! Winning-item selection.
//!
//! Documents are expected to list items in non-decreasing `effective_from`
//! order, but the selection here is deliberately order-independent: the
//! applied value for a parameter is always the effective item with the
//! latest activation instant, so an out-of-order document cannot roll a
//! parameter back to a stale value.

use super::entities::{Param, ParamItem};
use chrono::{DateTime, Utc};

impl Param {
    /// The single item to apply at `now`, if any.
    ///
    /// Among the items effective at `now`, picks the one with the greatest
    /// `effective_from`; items without a timestamp rank earliest. Ties
    /// resolve to the later document position, which preserves the
    /// "last effective item wins" behavior of well-ordered documents.
    pub fn winning_item(&self, now: DateTime<Utc>) -> Option<&ParamItem> {
        self.items
            .iter()
            .filter(|item| item.is_effective(now))
            .max_by_key(|item| item.effective_from.unwrap_or(DateTime::<Utc>::MIN_UTC))
    }
}
