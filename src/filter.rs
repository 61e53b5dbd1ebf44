// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Classification of annotation and label keys as platform-internal or
//! user-owned.
//!
//! Remote objects accumulate annotations written by other controllers. Those
//! must never surface in user-facing attribute trees, otherwise every read
//! reports drift the user never asked for and cannot fix.

use crate::constants::domains;
use std::collections::{BTreeMap, BTreeSet};

/// Classifies keys by their domain suffix.
///
/// The allow-list is injected at construction so resource kinds with
/// different allow-lists can coexist; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    allowed_platform_keys: BTreeSet<String>,
}

impl KeyFilter {
    pub fn new(allowed_platform_keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed_platform_keys: allowed_platform_keys.into_iter().collect(),
        }
    }

    /// Check whether a key is owned by the platform or the orchestration
    /// system. Keys that do not parse as `domain/path` are never internal.
    pub fn is_internal(&self, key: &str) -> bool {
        let Some((domain, _path)) = key.split_once('/') else {
            return false;
        };

        if domain == domains::PLATFORM {
            return !self.allowed_platform_keys.contains(key);
        }

        if domain.ends_with(domains::KUBERNETES) && domain != domains::APP_KUBERNETES {
            return true;
        }

        key.contains(domains::DEPRECATED)
    }

    /// Return a copy of `map` with every internal key removed, except keys
    /// listed in `keep` (annotation keys the user's own configuration names).
    pub fn strip_internal(
        &self,
        map: &BTreeMap<String, String>,
        keep: &BTreeSet<String>,
    ) -> BTreeMap<String, String> {
        map.iter()
            .filter(|(key, _)| !self.is_internal(key) || keep.contains(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Default for KeyFilter {
    fn default() -> Self {
        Self::new(crate::config::Config::default_allowed_annotations())
    }
}
