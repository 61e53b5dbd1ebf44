// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Space lifecycle. Identity: `cluster/name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::constants::annotations;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    ensure_name_or_generate_name, ensure_user_xor_team, fetched, is_not_found, map_attr_patch,
    require_scope, str_attr_patch,
};
use crate::types::Space;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const KIND: &str = "space";
const ID_ARITY: usize = 2;

pub struct SpaceReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl SpaceReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self, cluster: &str) -> Result<Api<Space>> {
        Ok(Api::all(self.registry.cluster(cluster)?))
    }

    /// Create the space and return its identity together with the decoded
    /// attributes, so server-defaulted fields become visible immediately.
    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        let cluster = require_scope(attrs, "cluster")?;
        ensure_name_or_generate_name(attrs)?;
        ensure_user_xor_team(attrs.get_str("user")?, attrs.get_str("team")?)?;

        let space = codec::space::encode(attrs)?;
        let api = self.api(&cluster)?;
        let created = api.create(&PostParams::default(), &space).await?;

        let id = identity::encode(&[&cluster, &created.name_any()])?;
        debug!("Created space {}", id);

        let mut decoded = codec::space::decode(&created, &self.filter, attrs)?;
        decoded.set_str("cluster", &cluster);
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, name) = (&parts[0], &parts[1]);

        let api = self.api(cluster)?;
        let space = fetched(api.get(name).await, KIND, id)?;

        let mut attrs = codec::space::decode(&space, &self.filter, prior)?;
        attrs.set_str("cluster", cluster);
        Ok(attrs)
    }

    /// Read-modify-write: re-reads the current object, then submits a merge
    /// patch containing only the fields whose attribute changed.
    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, name) = (&parts[0], &parts[1]);

        let api = self.api(cluster)?;
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let space = if patch.is_empty() {
            debug!("No changes for space {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        let mut attrs = codec::space::decode(&space, &self.filter, new)?;
        attrs.set_str("cluster", cluster);
        Ok(attrs)
    }

    /// Delete is idempotent: an already-gone space counts as success.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, name) = (&parts[0], &parts[1]);

        let api = self.api(cluster)?;
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Space {} already gone", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn build_patch(old: &Attributes, new: &Attributes) -> Result<Map<String, Value>> {
    let mut annotations = map_attr_patch(old, new, "annotations")?;

    // the sleep schedule rides in the same annotation map
    for (attribute, key) in [
        ("sleep_after", annotations::SLEEP_AFTER),
        ("sleep_delete_after", annotations::SLEEP_DELETE_AFTER),
    ] {
        let old_value = old.get_int(attribute)?;
        let new_value = new.get_int(attribute)?;
        if old_value != new_value {
            let entry = match new_value {
                Some(seconds) => Value::String(seconds.to_string()),
                None => Value::Null,
            };
            annotations
                .get_or_insert_with(Map::new)
                .insert(key.to_string(), entry);
        }
    }

    let mut metadata = Map::new();
    if let Some(annotations) = annotations {
        metadata.insert("annotations".to_string(), Value::Object(annotations));
    }
    if let Some(labels) = map_attr_patch(old, new, "labels")? {
        metadata.insert("labels".to_string(), Value::Object(labels));
    }

    let mut spec = Map::new();
    for attribute in ["user", "team", "objects"] {
        if let Some(value) = str_attr_patch(old, new, attribute)? {
            spec.insert(attribute.to_string(), value);
        }
    }

    let mut patch = Map::new();
    if !metadata.is_empty() {
        patch.insert("metadata".to_string(), Value::Object(metadata));
    }
    if !spec.is_empty() {
        patch.insert("spec".to_string(), Value::Object(spec));
    }
    Ok(patch)
}
