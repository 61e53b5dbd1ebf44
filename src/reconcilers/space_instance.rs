// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Space instance lifecycle in the management cluster.
//! Identity: `project-namespace/name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    encoded_attr_patch, ensure_name_or_generate_name, ensure_owner_one_of, fetched, is_not_found,
    map_attr_patch, require_scope, str_attr_patch,
};
use crate::types::SpaceInstance;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const KIND: &str = "space instance";
const ID_ARITY: usize = 2;

pub struct SpaceInstanceReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl SpaceInstanceReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self, namespace: &str) -> Api<SpaceInstance> {
        Api::namespaced(self.registry.management(), namespace)
    }

    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        let namespace = require_scope(attrs, "namespace")?;
        ensure_name_or_generate_name(attrs)?;
        ensure_owner_one_of(attrs)?;

        let instance = codec::instance::encode_space_instance(attrs)?;
        let created = self
            .api(&namespace)
            .create(&PostParams::default(), &instance)
            .await?;

        let id = identity::encode(&[&namespace, &created.name_any()])?;
        debug!("Created space instance {}", id);

        let decoded = codec::instance::decode_space_instance(&created, &self.filter, attrs)?;
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        let instance = fetched(self.api(namespace).get(name).await, KIND, id)?;
        codec::instance::decode_space_instance(&instance, &self.filter, prior)
    }

    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        let api = self.api(namespace);
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let instance = if patch.is_empty() {
            debug!("No changes for space instance {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        codec::instance::decode_space_instance(&instance, &self.filter, new)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        match self.api(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Space instance {} already gone", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) fn build_patch(old: &Attributes, new: &Attributes) -> Result<Map<String, Value>> {
    let mut metadata = Map::new();
    if let Some(annotations) = map_attr_patch(old, new, "annotations")? {
        metadata.insert("annotations".to_string(), Value::Object(annotations));
    }
    if let Some(labels) = map_attr_patch(old, new, "labels")? {
        metadata.insert("labels".to_string(), Value::Object(labels));
    }

    let mut spec = Map::new();
    if let Some(owner) = encoded_attr_patch(old, new, "owner", codec::common::encode_owner(new)?)? {
        spec.insert("owner".to_string(), owner);
    }
    if let Some(template_ref) = encoded_attr_patch(
        old,
        new,
        "template_ref",
        codec::common::encode_template_ref(new)?,
    )? {
        spec.insert("templateRef".to_string(), template_ref);
    }
    if let Some(parameters) = str_attr_patch(old, new, "parameters")? {
        spec.insert("parameters".to_string(), parameters);
    }
    if let Some(rules) = encoded_attr_patch(
        old,
        new,
        "extra_access_rules",
        codec::common::encode_extra_access_rules(new)?,
    )? {
        spec.insert("extraAccessRules".to_string(), rules);
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
