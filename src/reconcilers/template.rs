// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Template lifecycle in the management cluster. Identity: `name`.

use crate::attrs::Attributes;
use crate::codec;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::identity;
use crate::kubernetes::ClientRegistry;
use crate::reconcilers::{
    encoded_attr_patch, ensure_name_or_generate_name, fetched, is_not_found, map_attr_patch,
    str_attr_patch,
};
use crate::types::Template;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::{Api, ResourceExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const KIND: &str = "template";
const ID_ARITY: usize = 1;

pub struct TemplateReconciler {
    registry: ClientRegistry,
    filter: KeyFilter,
}

impl TemplateReconciler {
    pub fn new(registry: ClientRegistry, filter: KeyFilter) -> Self {
        Self { registry, filter }
    }

    fn api(&self) -> Api<Template> {
        Api::all(self.registry.management())
    }

    #[instrument(skip(self, attrs))]
    pub async fn create(&self, attrs: &Attributes) -> Result<(String, Attributes)> {
        ensure_name_or_generate_name(attrs)?;

        let template = codec::template::encode(attrs)?;
        let created = self.api().create(&PostParams::default(), &template).await?;

        let id = identity::encode(&[&created.name_any()])?;
        debug!("Created template {}", id);

        let decoded = codec::template::decode(&created, &self.filter, attrs)?;
        Ok((id, decoded))
    }

    #[instrument(skip(self, prior))]
    pub async fn read(&self, id: &str, prior: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let template = fetched(self.api().get(&parts[0]).await, KIND, id)?;
        codec::template::decode(&template, &self.filter, prior)
    }

    #[instrument(skip(self, old, new))]
    pub async fn update(&self, id: &str, old: &Attributes, new: &Attributes) -> Result<Attributes> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;
        let name = &parts[0];

        let api = self.api();
        let current = fetched(api.get(name).await, KIND, id)?;

        let patch = build_patch(old, new)?;
        let template = if patch.is_empty() {
            debug!("No changes for template {}", id);
            current
        } else {
            fetched(
                api.patch(name, &PatchParams::default(), &Patch::Merge(Value::Object(patch)))
                    .await,
                KIND,
                id,
            )?
        };

        codec::template::decode(&template, &self.filter, new)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let parts = identity::decode_or_err(id, ID_ARITY, KIND)?;

        match self.api().delete(&parts[0], &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("Template {} already gone", id);
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

    let encoded = codec::template::encode_spec(new)?;
    let mut spec = Map::new();
    if let Some(display_name) = str_attr_patch(old, new, "display_name")? {
        spec.insert("displayName".to_string(), display_name);
    }
    if let Some(description) = str_attr_patch(old, new, "description")? {
        spec.insert("description".to_string(), description);
    }
    if let Some(objects) = str_attr_patch(old, new, "objects")? {
        spec.insert("objects".to_string(), objects);
    }
    if let Some(parameters) = encoded_attr_patch(old, new, "parameters", encoded.parameters)? {
        spec.insert("parameters".to_string(), parameters);
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
    use crate::test_utils::MockService;

    fn template_json(name: &str) -> String {
        serde_json::json!({
            "apiVersion": "tether.geeko.me/v1",
            "kind": "Template",
            "metadata": { "name": name, "resourceVersion": "2" },
            "spec": {
                "displayName": "Development Space",
                "parameters": [
                    { "variable": "size", "options": ["small", "large"] },
                    { "variable": "region" }
                ]
            }
        })
        .to_string()
    }

    fn reconciler(mock: &MockService) -> TemplateReconciler {
        TemplateReconciler::new(
            ClientRegistry::new(mock.clone().into_client()),
            KeyFilter::default(),
        )
    }

    #[tokio::test]
    async fn test_read_preserves_parameter_order() {
        let mock = MockService::new().on_get(
            "/apis/tether.geeko.me/v1/templates/dev-space",
            200,
            &template_json("dev-space"),
        );
        let reconciler = reconciler(&mock);

        let attrs = reconciler.read("dev-space", &Attributes::new()).await.unwrap();

        let parameters = attrs.get_blocks("parameters").unwrap().unwrap();
        assert_eq!(parameters[0].get_str("variable").unwrap(), Some("size"));
        assert_eq!(parameters[1].get_str("variable").unwrap(), Some("region"));
    }

    #[tokio::test]
    async fn test_update_parameters_change() {
        let mock = MockService::new()
            .on_get(
                "/apis/tether.geeko.me/v1/templates/dev-space",
                200,
                &template_json("dev-space"),
            )
            .on_patch(
                "/apis/tether.geeko.me/v1/templates/dev-space",
                200,
                &template_json("dev-space"),
            );
        let reconciler = reconciler(&mock);

        let mut old_parameter = Attributes::new();
        old_parameter.set_str("variable", "size");
        let mut old = Attributes::new();
        old.set_blocks("parameters", vec![old_parameter]);

        let mut new_parameter = Attributes::new();
        new_parameter.set_str("variable", "size");
        new_parameter.set_str("default_value", "large");
        let mut new = Attributes::new();
        new.set_blocks("parameters", vec![new_parameter]);

        reconciler.update("dev-space", &old, &new).await.unwrap();

        let patch_request = mock
            .requests()
            .into_iter()
            .find(|r| r.method == "PATCH")
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&patch_request.body).unwrap();
        assert_eq!(body["spec"]["parameters"][0]["defaultValue"], "large");
    }

    #[tokio::test]
    async fn test_delete_not_found_is_success() {
        let mock = MockService::new();
        let reconciler = reconciler(&mock);

        reconciler.delete("gone").await.unwrap();
    }
}
