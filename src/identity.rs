// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Composite identities: the `/`-joined scope tuple persisted by the
//! front-end as its sole handle to a remote object.
//!
//! Arity and order are fixed per resource kind, e.g. `cluster/name` for
//! spaces and `cluster/namespace/name` for virtual clusters. The encoded form
//! is opaque to every other component.

use crate::error::{Result, TetherError};

/// Join scope parts into an identity string.
///
/// Parts must be non-empty and must not contain the `/` delimiter; both are
/// rejected eagerly since an ambiguous identity can never be decoded again.
pub fn encode(parts: &[&str]) -> Result<String> {
    for part in parts {
        if part.is_empty() {
            return Err(TetherError::InvalidIdentity(
                "identity part must not be empty".to_string(),
            ));
        }
        if part.contains('/') {
            return Err(TetherError::InvalidIdentity(format!(
                "identity part '{}' must not contain '/'",
                part
            )));
        }
    }

    Ok(parts.join("/"))
}

/// Split an identity string into exactly `arity` scope parts.
///
/// Returns all-empty parts and `false` when the token count does not match;
/// callers must not use the parts in that case.
pub fn decode(id: &str, arity: usize) -> (Vec<String>, bool) {
    let tokens: Vec<&str> = id.split('/').collect();
    if tokens.len() != arity || tokens.iter().any(|t| t.is_empty()) {
        return (vec![String::new(); arity], false);
    }

    (tokens.into_iter().map(str::to_string).collect(), true)
}

/// Decode for reconciler use: arity mismatch becomes a typed error naming the
/// resource kind.
pub fn decode_or_err(id: &str, arity: usize, kind: &'static str) -> Result<Vec<String>> {
    let (parts, ok) = decode(id, arity);
    if !ok {
        return Err(TetherError::InvalidIdentity(format!(
            "'{}' is not a valid {} identity, expected {} '/'-separated parts",
            id, kind, arity
        )));
    }
    Ok(parts)
}
