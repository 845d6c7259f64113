//! Search filters: banned contacts and forced prefixes
//!
//! A [`FilterSet`] constrains a route search two ways:
//!
//! - **Banned ids**: contacts that must not appear anywhere on the route.
//! - **Forced prefix**: an ordered list of contact ids the route, read from
//!   its root, must begin with.
//!
//! The Yen-style diversification search builds one filter set per spur
//! attempt; callers can also supply filters directly. A contradictory
//! filter set (a banned id inside the forced prefix, or a prefix that does
//! not emanate from the source) simply yields no route.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Constraints applied to a single route search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Contact ids that must not appear on the route
    pub banned: HashSet<u32>,
    /// Contact ids the route must start with, in order
    pub forced_prefix: Vec<u32>,
}

impl FilterSet {
    /// An empty filter set (no constraints).
    pub fn none() -> Self {
        Self::default()
    }

    /// Ban a single contact id.
    pub fn with_ban(mut self, id: u32) -> Self {
        self.banned.insert(id);
        self
    }

    /// Force the route to start with the given id sequence.
    pub fn with_forced_prefix(mut self, prefix: Vec<u32>) -> Self {
        self.forced_prefix = prefix;
        self
    }

    /// Whether this filter set constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.banned.is_empty() && self.forced_prefix.is_empty()
    }

    pub fn is_banned(&self, id: u32) -> bool {
        self.banned.contains(&id)
    }

    /// Whether a forced prefix is present.
    pub fn has_forced_prefix(&self) -> bool {
        !self.forced_prefix.is_empty()
    }

    /// The forced id at prefix position `k`, if the prefix extends that far.
    pub fn forced_at(&self, k: usize) -> Option<u32> {
        self.forced_prefix.get(k).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters() {
        let f = FilterSet::none();
        assert!(f.is_empty());
        assert!(!f.is_banned(7));
        assert_eq!(f.forced_at(0), None);
    }

    #[test]
    fn test_ban_and_prefix() {
        let f = FilterSet::none().with_ban(5).with_forced_prefix(vec![1, 2]);
        assert!(!f.is_empty());
        assert!(f.is_banned(5));
        assert!(!f.is_banned(1));
        assert!(f.has_forced_prefix());
        assert_eq!(f.forced_at(0), Some(1));
        assert_eq!(f.forced_at(1), Some(2));
        assert_eq!(f.forced_at(2), None);
    }
}
