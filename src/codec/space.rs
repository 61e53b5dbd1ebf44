// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Space codec.
//!
//! The sleep schedule is not carried in `spec`; it lives in the allow-listed
//! platform annotations as seconds counts and is surfaced as dedicated
//! integer attributes on top of the generic annotations map.

use crate::attrs::Attributes;
use crate::codec::metadata;
use crate::constants::annotations;
use crate::error::{Result, TetherError};
use crate::filter::KeyFilter;
use crate::types::space::{Space, SpaceSpec};
use kube::api::ObjectMeta;

pub fn encode(attrs: &Attributes) -> Result<Space> {
    let mut meta = metadata::encode_metadata(attrs)?;
    encode_sleep_annotation(attrs, "sleep_after", annotations::SLEEP_AFTER, &mut meta)?;
    encode_sleep_annotation(
        attrs,
        "sleep_delete_after",
        annotations::SLEEP_DELETE_AFTER,
        &mut meta,
    )?;

    Ok(Space {
        metadata: meta,
        spec: encode_spec(attrs)?,
        status: None,
    })
}

pub fn encode_spec(attrs: &Attributes) -> Result<SpaceSpec> {
    Ok(SpaceSpec {
        user: attrs.get_str("user")?.map(str::to_string),
        team: attrs.get_str("team")?.map(str::to_string),
        objects: attrs.get_str("objects")?.map(str::to_string),
    })
}

pub fn decode(space: &Space, filter: &KeyFilter, prior: &Attributes) -> Result<Attributes> {
    let mut attrs = Attributes::new();

    let keep_annotations = metadata::keep_set(prior, "annotations")?;
    let keep_labels = metadata::keep_set(prior, "labels")?;
    metadata::decode_metadata(
        &space.metadata,
        filter,
        &keep_annotations,
        &keep_labels,
        &mut attrs,
    )?;

    if let Some(user) = &space.spec.user {
        attrs.set_str("user", user);
    }
    if let Some(team) = &space.spec.team {
        attrs.set_str("team", team);
    }
    if let Some(objects) = &space.spec.objects {
        attrs.set_str("objects", objects);
    }

    if let Some(seconds) = seconds_annotation(&space.metadata, annotations::SLEEP_AFTER)? {
        attrs.set_int("sleep_after", seconds);
    }
    if let Some(seconds) = seconds_annotation(&space.metadata, annotations::SLEEP_DELETE_AFTER)? {
        attrs.set_int("sleep_delete_after", seconds);
    }

    Ok(attrs)
}

fn encode_sleep_annotation(
    attrs: &Attributes,
    attribute: &str,
    key: &str,
    meta: &mut ObjectMeta,
) -> Result<()> {
    if let Some(seconds) = attrs.get_int(attribute)? {
        meta.annotations
            .get_or_insert_with(Default::default)
            .insert(key.to_string(), seconds.to_string());
    }
    Ok(())
}

/// Parse a seconds-count annotation. An unparsable value fails the whole
/// decode; a partially decoded tree is never returned.
fn seconds_annotation(meta: &ObjectMeta, key: &str) -> Result<Option<i64>> {
    let Some(value) = meta.annotations.as_ref().and_then(|a| a.get(key)) else {
        return Ok(None);
    };

    value
        .parse()
        .map(Some)
        .map_err(|_| TetherError::AnnotationParse {
            key: key.to_string(),
            value: value.clone(),
        })
}
