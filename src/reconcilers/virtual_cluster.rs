// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Virtual cluster lifecycle. Identity: `cluster/namespace/name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    encoded_attr_patch, ensure_name_or_generate_name, fetched, is_not_found, map_attr_patch,
    require_scope, str_attr_patch,
};
use crate::types::VirtualCluster;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const KIND: &str = "virtual cluster";
const ID_ARITY: usize = 3;

pub struct VirtualClusterReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl VirtualClusterReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self, cluster: &str, namespace: &str) -> Result<Api<VirtualCluster>> {
        Ok(Api::namespaced(self.registry.cluster(cluster)?, namespace))
    }

    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        let cluster = require_scope(attrs, "cluster")?;
        let namespace = require_scope(attrs, "namespace")?;
        ensure_name_or_generate_name(attrs)?;

        let virtual_cluster = codec::virtual_cluster::encode(attrs)?;
        let api = self.api(&cluster, &namespace)?;
        let created = api.create(&PostParams::default(), &virtual_cluster).await?;

        let id = identity::encode(&[&cluster, &namespace, &created.name_any()])?;
        debug!("Created virtual cluster {}", id);

        let mut decoded = codec::virtual_cluster::decode(&created, &self.filter, attrs)?;
        decoded.set_str("cluster", &cluster);
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, namespace, name) = (&parts[0], &parts[1], &parts[2]);

        let api = self.api(cluster, namespace)?;
        let virtual_cluster = fetched(api.get(name).await, KIND, id)?;

        let mut attrs = codec::virtual_cluster::decode(&virtual_cluster, &self.filter, prior)?;
        attrs.set_str("cluster", cluster);
        Ok(attrs)
    }

    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, namespace, name) = (&parts[0], &parts[1], &parts[2]);

        let api = self.api(cluster, namespace)?;
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let virtual_cluster = if patch.is_empty() {
            debug!("No changes for virtual cluster {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        let mut attrs = codec::virtual_cluster::decode(&virtual_cluster, &self.filter, new)?;
        attrs.set_str("cluster", cluster);
        Ok(attrs)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let (cluster, namespace, name) = (&parts[0], &parts[1], &parts[2]);

        let api = self.api(cluster, namespace)?;
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Virtual cluster {} already gone", id);
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

    let mut spec = Map::new();
    if let Some(helm_release) = encoded_attr_patch(
        old,
        new,
        "helm_release",
        codec::virtual_cluster::encode_helm_release(new)?,
    )? {
        spec.insert("helmRelease".to_string(), helm_release);
    }
    if let Some(access) =
        encoded_attr_patch(old, new, "access", codec::common::encode_access(new)?)?
    {
        spec.insert("access".to_string(), access);
    }
    if let Some(objects) = str_attr_patch(old, new, "objects")? {
        spec.insert("objects".to_string(), objects);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TetherError;
    use crate::test_utils::MockService;

    fn vcluster_json(name: &str) -> String {
        serde_json::json!({
            "apiVersion": "tether.geeko.me/v1",
            "kind": "VirtualCluster",
            "metadata": {
                "name": name,
                "namespace": "team-a",
                "resourceVersion": "7"
            },
            "spec": {
                "helmRelease": {
                    "chart": { "name": "vcluster", "version": "0.15.0" }
                }
            }
        })
        .to_string()
    }

    fn reconciler(mock: &MockService) -> VirtualClusterReconciler {
        let registry = ClientRegistry::new(mock.clone().into_client())
            .with_cluster("loft-cluster", mock.clone().into_client());
        VirtualClusterReconciler::new(registry, KeyFilter::default())
    }

    #[tokio::test]
    async fn test_create_encodes_three_part_identity() {
        let mock = MockService::new().on_post(
            "/apis/tether.geeko.me/v1/namespaces/team-a/virtualclusters",
            201,
            &vcluster_json("my-vcluster"),
        );
        let reconciler = reconciler(&mock);

        let mut attrs = Attributes::new();
        attrs.set_str("cluster", "loft-cluster");
        attrs.set_str("namespace", "team-a");
        attrs.set_str("name", "my-vcluster");

        let (id, decoded) = reconciler.create(&attrs).await.unwrap();

        assert_eq!(id, "loft-cluster/team-a/my-vcluster");
        let helm_release = decoded.get_block("helm_release").unwrap().unwrap();
        let chart = helm_release.get_block("chart").unwrap().unwrap();
        assert_eq!(chart.get_str("name").unwrap(), Some("vcluster"));
    }

    #[tokio::test]
    async fn test_create_without_namespace_fails_fast() {
        let mock = MockService::new();
        let reconciler = reconciler(&mock);

        let mut attrs = Attributes::new();
        attrs.set_str("cluster", "loft-cluster");
        attrs.set_str("name", "my-vcluster");

        let err = reconciler.create(&attrs).await.unwrap_err();

        assert!(matches!(err, TetherError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_read_two_part_identity_rejected() {
        let mock = MockService::new();
        let reconciler = reconciler(&mock);

        let err = reconciler
            .read("loft-cluster/my-vcluster", &Attributes::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TetherError::InvalidIdentity(_)));
    }

    #[tokio::test]
    async fn test_update_helm_values_change() {
        let mock = MockService::new()
            .on_get(
                "/apis/tether.geeko.me/v1/namespaces/team-a/virtualclusters/my-vcluster",
                200,
                &vcluster_json("my-vcluster"),
            )
            .on_patch(
                "/apis/tether.geeko.me/v1/namespaces/team-a/virtualclusters/my-vcluster",
                200,
                &vcluster_json("my-vcluster"),
            );
        let reconciler = reconciler(&mock);

        let mut old_release = Attributes::new();
        old_release.set_str("values", "a: 1");
        let mut old = Attributes::new();
        old.set_block("helm_release", old_release);

        let mut new_release = Attributes::new();
        new_release.set_str("values", "a: 2");
        let mut new = Attributes::new();
        new.set_block("helm_release", new_release);

        reconciler
            .update("loft-cluster/team-a/my-vcluster", &old, &new)
            .await
            .unwrap();

        let patch_request = mock
            .requests()
            .into_iter()
            .find(|r| r.method == "PATCH")
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&patch_request.body).unwrap();
        assert_eq!(body["spec"]["helmRelease"]["values"], "a: 2");
        assert!(body.get("metadata").is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found_is_success() {
        let mock = MockService::new();
        let reconciler = reconciler(&mock);

        reconciler
            .delete("loft-cluster/team-a/gone")
            .await
            .unwrap();
    }
}
