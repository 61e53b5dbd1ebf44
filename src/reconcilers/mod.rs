// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle reconcilers, one per resource kind.
//!
//! Every operation is a single synchronous call chain against the object
//! store: create and delete make one round trip, update reads fresh and then
//! submits a minimal merge patch. There is no caching, no retry and no
//! conflict handling; callers serialize operations per identity.

pub mod project;
pub mod space;
pub mod space_instance;
pub mod template;
pub mod virtual_cluster;
pub mod virtual_cluster_instance;

pub use project::ProjectReconciler;
pub use space::SpaceReconciler;
pub use space_instance::SpaceInstanceReconciler;
pub use template::TemplateReconciler;
pub use virtual_cluster::VirtualClusterReconciler;
pub use virtual_cluster_instance::VirtualClusterInstanceReconciler;

use crate::attrs::Attributes;
use crate::diff;
use crate::error::{Result, TetherError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Exactly one of name and generate_name must be set before creation.
pub(crate) fn ensure_name_or_generate_name(attrs: &Attributes) -> Result<()> {
    let name = attrs.get_str("name")?;
    let generate_name = attrs.get_str("generate_name")?;

    match (name, generate_name) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(_), Some(_)) => Err(TetherError::Validation(
            "name and generate_name are mutually exclusive".to_string(),
        )),
        (None, None) => Err(TetherError::Validation(
            "one of name or generate_name is required".to_string(),
        )),
    }
}

/// User and team ownership are mutually exclusive. Both fields are optional,
/// so an ownerless resource passes.
pub(crate) fn ensure_user_xor_team(
    user: Option<&str>,
    team: Option<&str>,
) -> Result<()> {
    if user.is_some() && team.is_some() {
        return Err(TetherError::Validation(
            "user and team are mutually exclusive".to_string(),
        ));
    }
    Ok(())
}

/// One-of check on the `owner` block of instance and project attributes.
pub(crate) fn ensure_owner_one_of(attrs: &Attributes) -> Result<()> {
    let Some(block) = attrs.get_block("owner")? else {
        return Ok(());
    };
    ensure_user_xor_team(block.get_str("user")?, block.get_str("team")?)
}

/// A required scope attribute, e.g. the cluster a space lives in.
pub(crate) fn require_scope(attrs: &Attributes, attribute: &str) -> Result<String> {
    attrs
        .get_str(attribute)?
        .map(str::to_string)
        .ok_or_else(|| TetherError::Validation(format!("attribute '{}' is required", attribute)))
}

/// Has the attribute changed at all between the old and new tree? Compared on
/// the raw value, so it also covers block- and list-valued attributes.
pub(crate) fn attr_changed(old: &Attributes, new: &Attributes, attribute: &str) -> bool {
    old.get(attribute) != new.get(attribute)
}

/// Merge-patch fragment for a map-valued attribute (annotations, labels).
///
/// Returns `None` when the attribute itself is untouched, keeping the field
/// entirely absent from the patch. Otherwise added and modified keys become
/// upserts and deleted keys become explicit nulls; keys never named by the
/// user (including internal keys filtered out at read time) do not appear and
/// are left untouched server-side by merge-patch semantics.
pub(crate) fn map_attr_patch(
    old: &Attributes,
    new: &Attributes,
    attribute: &str,
) -> Result<Option<Map<String, Value>>> {
    if !attr_changed(old, new, attribute) {
        return Ok(None);
    }

    let old_map = old.get_map(attribute)?.cloned().unwrap_or_default();
    let new_map = new.get_map(attribute)?.cloned().unwrap_or_default();
    let delta = diff::diff(&old_map, &new_map);

    let mut patch = Map::new();
    for (key, value) in delta.upserts() {
        patch.insert(key.clone(), Value::String(value.clone()));
    }
    for key in delta.deleted.keys() {
        patch.insert(key.clone(), Value::Null);
    }
    Ok(Some(patch))
}

/// Merge-patch fragment for a string attribute: the new value, or null when
/// the attribute was cleared. `None` when unchanged.
pub(crate) fn str_attr_patch(
    old: &Attributes,
    new: &Attributes,
    attribute: &str,
) -> Result<Option<Value>> {
    let old_value = old.get_str(attribute)?;
    let new_value = new.get_str(attribute)?;
    if old_value == new_value {
        return Ok(None);
    }

    Ok(Some(match new_value {
        Some(value) => Value::String(value.to_string()),
        None => Value::Null,
    }))
}

/// Merge-patch fragment for a structured sub-object: re-encoded from the new
/// attributes when the underlying attribute changed, null when it was
/// removed. `None` when unchanged.
pub(crate) fn encoded_attr_patch<T: Serialize>(
    old: &Attributes,
    new: &Attributes,
    attribute: &str,
    encoded: Option<T>,
) -> Result<Option<Value>> {
    if !attr_changed(old, new, attribute) {
        return Ok(None);
    }

    Ok(Some(match encoded {
        Some(value) => serde_json::to_value(value)?,
        None => Value::Null,
    }))
}

pub(crate) fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == 404)
}

/// Map a store lookup failure to the typed not-found error; everything else
/// passes through unmodified.
pub(crate) fn fetched<T>(
    result: std::result::Result<T, kube::Error>,
    kind: &'static str,
    id: &str,
) -> Result<T> {
    match result {
        Ok(object) => Ok(object),
        Err(e) if is_not_found(&e) => Err(TetherError::NotFound {
            kind,
            id: id.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_name_or_generate_name() {
        let mut attrs = Attributes::new();
        assert!(ensure_name_or_generate_name(&attrs).is_err());

        attrs.set_str("name", "myspace");
        assert!(ensure_name_or_generate_name(&attrs).is_ok());

        attrs.set_str("generate_name", "myspace-");
        assert!(ensure_name_or_generate_name(&attrs).is_err());

        attrs.remove("name");
        assert!(ensure_name_or_generate_name(&attrs).is_ok());
    }

    #[test]
    fn test_ensure_user_xor_team() {
        assert!(ensure_user_xor_team(None, None).is_ok());
        assert!(ensure_user_xor_team(Some("alice"), None).is_ok());
        assert!(ensure_user_xor_team(None, Some("platform")).is_ok());
        assert!(ensure_user_xor_team(Some("alice"), Some("platform")).is_err());
    }

    #[test]
    fn test_map_attr_patch_untouched_is_absent() {
        let mut old = Attributes::new();
        old.set_map(
            "annotations",
            [("a".to_string(), "1".to_string())].into_iter().collect(),
        );
        let new = old.clone();

        assert_eq!(map_attr_patch(&old, &new, "annotations").unwrap(), None);
    }

    #[test]
    fn test_map_attr_patch_deleted_key_becomes_null() {
        let mut old = Attributes::new();
        old.set_map(
            "labels",
            [
                ("keep".to_string(), "1".to_string()),
                ("drop".to_string(), "2".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        let mut new = Attributes::new();
        new.set_map(
            "labels",
            [("keep".to_string(), "1".to_string())].into_iter().collect(),
        );

        let patch = map_attr_patch(&old, &new, "labels").unwrap().unwrap();

        assert_eq!(patch.get("keep").unwrap(), &Value::String("1".to_string()));
        assert_eq!(patch.get("drop").unwrap(), &Value::Null);
    }

    #[test]
    fn test_str_attr_patch() {
        let mut old = Attributes::new();
        old.set_str("user", "alice");
        let mut new = Attributes::new();
        new.set_str("user", "bob");

        assert_eq!(
            str_attr_patch(&old, &new, "user").unwrap(),
            Some(Value::String("bob".to_string()))
        );
        assert_eq!(str_attr_patch(&old, &old.clone(), "user").unwrap(), None);
        assert_eq!(
            str_attr_patch(&old, &Attributes::new(), "user").unwrap(),
            Some(Value::Null)
        );
    }
}
