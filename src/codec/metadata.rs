// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object metadata codec: name, namespace, annotations and labels.

use crate::attrs::Attributes;
use crate::error::Result;
use crate::filter::KeyFilter;
use kube::api::ObjectMeta;
use std::collections::BTreeSet;

/// Build object metadata from the identifying and map-valued attributes.
/// Empty maps encode as absent, not as empty sub-structures.
pub fn encode_metadata(attrs: &Attributes) -> Result<ObjectMeta> {
    let annotations = attrs.get_map("annotations")?.cloned().filter(|m| !m.is_empty());
    let labels = attrs.get_map("labels")?.cloned().filter(|m| !m.is_empty());

    Ok(ObjectMeta {
        name: attrs.get_str("name")?.map(str::to_string),
        generate_name: attrs.get_str("generate_name")?.map(str::to_string),
        namespace: attrs.get_str("namespace")?.map(str::to_string),
        annotations,
        labels,
        ..Default::default()
    })
}

/// Decode metadata into `attrs`, stripping internal annotation and label keys
/// not named by the caller's keep-sets.
pub fn decode_metadata(
    meta: &ObjectMeta,
    filter: &KeyFilter,
    keep_annotations: &BTreeSet<String>,
    keep_labels: &BTreeSet<String>,
    attrs: &mut Attributes,
) -> Result<()> {
    if let Some(name) = &meta.name {
        attrs.set_str("name", name);
    }
    if let Some(generate_name) = &meta.generate_name {
        if !generate_name.is_empty() {
            attrs.set_str("generate_name", generate_name);
        }
    }
    if let Some(namespace) = &meta.namespace {
        attrs.set_str("namespace", namespace);
    }

    if let Some(annotations) = &meta.annotations {
        let visible = filter.strip_internal(annotations, keep_annotations);
        if !visible.is_empty() {
            attrs.set_map("annotations", visible);
        }
    }
    if let Some(labels) = &meta.labels {
        let visible = filter.strip_internal(labels, keep_labels);
        if !visible.is_empty() {
            attrs.set_map("labels", visible);
        }
    }

    Ok(())
}

/// Keys of a map-valued attribute in the user's prior configuration; these
/// stay visible on decode even when classified internal.
pub fn keep_set(prior: &Attributes, attribute: &str) -> Result<BTreeSet<String>> {
    Ok(prior
        .get_map(attribute)?
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_metadata_basic() {
        let mut attrs = Attributes::new();
        attrs.set_str("name", "myspace");
        attrs.set_map("labels", map(&[("env", "dev")]));

        let meta = encode_metadata(&attrs).unwrap();

        assert_eq!(meta.name.as_deref(), Some("myspace"));
        assert_eq!(meta.generate_name, None);
        assert_eq!(meta.labels.unwrap(), map(&[("env", "dev")]));
        assert_eq!(meta.annotations, None);
    }

    #[test]
    fn test_encode_metadata_empty_map_is_absent() {
        let mut attrs = Attributes::new();
        attrs.set_str("name", "myspace");
        attrs.set_map("annotations", BTreeMap::new());

        let meta = encode_metadata(&attrs).unwrap();

        assert_eq!(meta.annotations, None);
    }

    #[test]
    fn test_decode_metadata_filters_internal_annotations() {
        let meta = ObjectMeta {
            name: Some("myspace".to_string()),
            annotations: Some(map(&[
                ("kubernetes.io/foo", "bar"),
                ("app.kubernetes.io/name", "x"),
            ])),
            ..Default::default()
        };
        let filter = KeyFilter::default();
        let mut attrs = Attributes::new();

        decode_metadata(&meta, &filter, &BTreeSet::new(), &BTreeSet::new(), &mut attrs).unwrap();

        let annotations = attrs.get_map("annotations").unwrap().unwrap();
        assert!(!annotations.contains_key("kubernetes.io/foo"));
        assert_eq!(annotations.get("app.kubernetes.io/name").unwrap(), "x");
    }

    #[test]
    fn test_decode_metadata_all_internal_annotations_absent_entry() {
        let meta = ObjectMeta {
            name: Some("myspace".to_string()),
            annotations: Some(map(&[("kubernetes.io/foo", "bar")])),
            ..Default::default()
        };
        let filter = KeyFilter::default();
        let mut attrs = Attributes::new();

        decode_metadata(&meta, &filter, &BTreeSet::new(), &BTreeSet::new(), &mut attrs).unwrap();

        assert!(attrs.get("annotations").is_none());
    }

    #[test]
    fn test_keep_set_from_prior_attrs() {
        let mut prior = Attributes::new();
        prior.set_map("annotations", map(&[("tether.geeko.me/space-status", "Active")]));

        let keep = keep_set(&prior, "annotations").unwrap();

        assert!(keep.contains("tether.geeko.me/space-status"));
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut attrs = Attributes::new();
        attrs.set_str("name", "myspace");
        attrs.set_str("namespace", "team-a");
        attrs.set_map("annotations", map(&[("example.com/owner", "alice")]));
        attrs.set_map("labels", map(&[("env", "dev")]));

        let meta = encode_metadata(&attrs).unwrap();
        let filter = KeyFilter::default();
        let mut decoded = Attributes::new();
        decode_metadata(&meta, &filter, &BTreeSet::new(), &BTreeSet::new(), &mut decoded).unwrap();

        assert_eq!(decoded, attrs);
    }
}
