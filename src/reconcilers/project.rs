// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project lifecycle in the management cluster. Identity: `name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    encoded_attr_patch, ensure_name_or_generate_name, ensure_owner_one_of, fetched, is_not_found,
    map_attr_patch, str_attr_patch,
};
use crate::types::Project;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const KIND: &str = "project";
const ID_ARITY: usize = 1;

pub struct ProjectReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl ProjectReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self) -> Api<Project> {
        Api::all(self.registry.management())
    }

    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        ensure_name_or_generate_name(attrs)?;
        ensure_owner_one_of(attrs)?;

        let project = codec::project::encode(attrs)?;
        let created = self.api().create(&PostParams::default(), &project).await?;

        let id = identity::encode(&[&created.name_any()])?;
        debug!("Created project {}", id);

        let decoded = codec::project::decode(&created, &self.filter, attrs)?;
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let project = fetched(self.api().get(&parts[0]).await, KIND, id)?;
        codec::project::decode(&project, &self.filter, prior)
    }

    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let name = &parts[0];

        let api = self.api();
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let project = if patch.is_empty() {
            debug!("No changes for project {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        codec::project::decode(&project, &self.filter, new)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;

        match self.api().delete(&parts[0], &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Project {} already gone", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn build_patch(old: &Attributes, new: &Attributes) -> Result<Map<String, Value>> {
    let mut metadata = Map::new();
    if let Some(annotations) = map_attr_patch(old, new, "annotations")? {
        metadata.insert("annotations".to_string(), Value::Object(annotations));
    }
    if let Some(labels) = map_attr_patch(old, new, "labels")? {
        metadata.insert("labels".to_string(), Value::Object(labels));
    }

    let encoded = codec::project::encode_spec(new)?;
    let mut spec = Map::new();
    if let Some(display_name) = str_attr_patch(old, new, "display_name")? {
        spec.insert("displayName".to_string(), display_name);
    }
    if let Some(description) = str_attr_patch(old, new, "description")? {
        spec.insert("description".to_string(), description);
    }
    if let Some(owner) = encoded_attr_patch(old, new, "owner", encoded.owner)? {
        spec.insert("owner".to_string(), owner);
    }
    if let Some(members) = encoded_attr_patch(old, new, "members", encoded.members)? {
        spec.insert("members".to_string(), members);
    }
    if let Some(quotas) = encoded_attr_patch(old, new, "quotas", encoded.quotas)? {
        spec.insert("quotas".to_string(), quotas);
    }
    if let Some(clusters) =
        encoded_attr_patch(old, new, "allowed_clusters", encoded.allowed_clusters)?
    {
        spec.insert("allowedClusters".to_string(), clusters);
    }
    if let Some(templates) =
        encoded_attr_patch(old, new, "allowed_templates", encoded.allowed_templates)?
    {
        spec.insert("allowedTemplates".to_string(), templates);
    }
    if let Some(pattern) =
        encoded_attr_patch(old, new, "namespace_pattern", encoded.namespace_pattern)?
    {
        spec.insert("namespacePattern".to_string(), pattern);
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
