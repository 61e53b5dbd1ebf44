// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Virtual cluster instance lifecycle in the management cluster.
//! Identity: `project-namespace/name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    ensure_name_or_generate_name, ensure_owner_one_of, fetched, is_not_found, require_scope,
    space_instance::build_patch,
};
use crate::types::VirtualClusterInstance;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::Value;
use tracing::{debug, instrument};

const KIND: &str = "virtual cluster instance";
const ID_ARITY: usize = 2;

pub struct VirtualClusterInstanceReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl VirtualClusterInstanceReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self, namespace: &str) -> Api<VirtualClusterInstance> {
        Api::namespaced(self.registry.management(), namespace)
    }

    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        let namespace = require_scope(attrs, "namespace")?;
        ensure_name_or_generate_name(attrs)?;
        ensure_owner_one_of(attrs)?;

        let instance = codec::instance::encode_virtual_cluster_instance(attrs)?;
        let created = self
            .api(&namespace)
            .create(&PostParams::default(), &instance)
            .await?;

        let id = identity::encode(&[&namespace, &created.name_any()])?;
        debug!("Created virtual cluster instance {}", id);

        let decoded =
            codec::instance::decode_virtual_cluster_instance(&created, &self.filter, attrs)?;
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        let instance = fetched(self.api(namespace).get(name).await, KIND, id)?;
        codec::instance::decode_virtual_cluster_instance(&instance, &self.filter, prior)
    }

    /// Same field set as the space instance; the patch layout is shared.
    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        let api = self.api(namespace);
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let instance = if patch.is_empty() {
            debug!("No changes for virtual cluster instance {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        codec::instance::decode_virtual_cluster_instance(&instance, &self.filter, new)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (namespace, name) = (&parts[0], &parts[1]);

        match self.api(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Virtual cluster instance {} already gone", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
