// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Key-value map reconciliation for annotation and label attributes.

use std::collections::BTreeMap;

/// The three disjoint partitions of a map comparison.
///
/// Keys present in both inputs are always reported as modified, even when the
/// value is unchanged; callers apply added and modified as idempotent upserts,
/// so an unchanged value is a no-op. Deleted carries the old value for
/// diagnostics only, removal operates on the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapDelta {
    pub added: BTreeMap<String, String>,
    pub modified: BTreeMap<String, String>,
    pub deleted: BTreeMap<String, String>,
}

impl MapDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Keys to upsert: added and modified, values from the new map.
    pub fn upserts(&self) -> impl Iterator<Item = (&String, &String)> {
        self.added.iter().chain(self.modified.iter())
    }
}

/// Partition the keys of `old` and `new` into added, modified and deleted.
pub fn diff(old: &BTreeMap<String, String>, new: &BTreeMap<String, String>) -> MapDelta {
    let mut delta = MapDelta::default();

    for (key, value) in new {
        if old.contains_key(key) {
            delta.modified.insert(key.clone(), value.clone());
        } else {
            delta.added.insert(key.clone(), value.clone());
        }
    }

    for (key, value) in old {
        if !new.contains_key(key) {
            delta.deleted.insert(key.clone(), value.clone());
        }
    }

    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_diff_added_modified_deleted() {
        let old = map(&[("a", "1"), ("b", "2")]);
        let new = map(&[("b", "3"), ("c", "4")]);

        let delta = diff(&old, &new);

        assert_eq!(delta.added, map(&[("c", "4")]));
        assert_eq!(delta.modified, map(&[("b", "3")]));
        assert_eq!(delta.deleted, map(&[("a", "1")]));
    }

    #[test]
    fn test_diff_empty_old_everything_added() {
        let old = BTreeMap::new();
        let new = map(&[("a", "1"), ("b", "2")]);

        let delta = diff(&old, &new);

        assert_eq!(delta.added, new);
        assert!(delta.modified.is_empty());
        assert!(delta.deleted.is_empty());
    }

    #[test]
    fn test_diff_empty_new_everything_deleted() {
        let old = map(&[("a", "1"), ("b", "2")]);
        let new = BTreeMap::new();

        let delta = diff(&old, &new);

        assert!(delta.added.is_empty());
        assert!(delta.modified.is_empty());
        assert_eq!(delta.deleted, old);
    }

    #[test]
    fn test_diff_both_empty() {
        let delta = diff(&BTreeMap::new(), &BTreeMap::new());
        assert!(delta.is_empty());
    }

    #[test]
    fn test_diff_unchanged_value_still_modified() {
        let old = map(&[("a", "1")]);
        let new = map(&[("a", "1")]);

        let delta = diff(&old, &new);

        assert_eq!(delta.modified, map(&[("a", "1")]));
        assert!(delta.added.is_empty());
        assert!(delta.deleted.is_empty());
    }

    #[test]
    fn test_diff_partition_law() {
        let old = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let new = map(&[("b", "9"), ("c", "3"), ("d", "4"), ("e", "5")]);

        let delta = diff(&old, &new);

        let added: Vec<_> = delta.added.keys().cloned().collect();
        let modified: Vec<_> = delta.modified.keys().cloned().collect();
        let deleted: Vec<_> = delta.deleted.keys().cloned().collect();

        // added = keys(new) \ keys(old)
        assert_eq!(added, vec!["d", "e"]);
        // modified = keys(new) ∩ keys(old)
        assert_eq!(modified, vec!["b", "c"]);
        // deleted = keys(old) \ keys(new)
        assert_eq!(deleted, vec!["a"]);

        // pairwise disjoint
        for k in &added {
            assert!(!delta.modified.contains_key(k) && !delta.deleted.contains_key(k));
        }
        for k in &modified {
            assert!(!delta.deleted.contains_key(k));
        }
    }

    #[test]
    fn test_upserts_covers_added_and_modified() {
        let old = map(&[("a", "1")]);
        let new = map(&[("a", "2"), ("b", "3")]);

        let delta = diff(&old, &new);
        let upserts: BTreeMap<_, _> = delta
            .upserts()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        assert_eq!(upserts, map(&[("a", "2"), ("b", "3")]));
    }
}
