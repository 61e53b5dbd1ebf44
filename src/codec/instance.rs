// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Space instance and virtual cluster instance codecs. The two specs carry
//! the same fields but are distinct API types.

use crate::attrs::Attributes;
use crate::codec::{common, metadata};
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::types::instance::{
    SpaceInstance, SpaceInstanceSpec, VirtualClusterInstance, VirtualClusterInstanceSpec,
};

pub fn encode_space_instance(attrs: &Attributes) -> Result<SpaceInstance> {
    Ok(SpaceInstance {
        metadata: metadata::encode_metadata(attrs)?,
        spec: SpaceInstanceSpec {
            owner: common::encode_owner(attrs)?,
            template_ref: common::encode_template_ref(attrs)?,
            parameters: attrs.get_str("parameters")?.map(str::to_string),
            extra_access_rules: common::encode_extra_access_rules(attrs)?,
        },
    })
}

pub fn encode_virtual_cluster_instance(attrs: &Attributes) -> Result<VirtualClusterInstance> {
    Ok(VirtualClusterInstance {
        metadata: metadata::encode_metadata(attrs)?,
        spec: VirtualClusterInstanceSpec {
            owner: common::encode_owner(attrs)?,
            template_ref: common::encode_template_ref(attrs)?,
            parameters: attrs.get_str("parameters")?.map(str::to_string),
            extra_access_rules: common::encode_extra_access_rules(attrs)?,
        },
    })
}

pub fn decode_space_instance(
    instance: &SpaceInstance,
    filter: &KeyFilter,
    prior: &Attributes,
) -> Result<Attributes> {
    let mut attrs = Attributes::new();
    decode_instance_metadata(&instance.metadata, filter, prior, &mut attrs)?;
    common::decode_owner(instance.spec.owner.as_ref(), &mut attrs);
    common::decode_template_ref(instance.spec.template_ref.as_ref(), &mut attrs);
    if let Some(parameters) = &instance.spec.parameters {
        attrs.set_str("parameters", parameters);
    }
    common::decode_extra_access_rules(instance.spec.extra_access_rules.as_ref(), &mut attrs);
    Ok(attrs)
}

pub fn decode_virtual_cluster_instance(
    instance: &VirtualClusterInstance,
    filter: &KeyFilter,
    prior: &Attributes,
) -> Result<Attributes> {
    let mut attrs = Attributes::new();
    decode_instance_metadata(&instance.metadata, filter, prior, &mut attrs)?;
    common::decode_owner(instance.spec.owner.as_ref(), &mut attrs);
    common::decode_template_ref(instance.spec.template_ref.as_ref(), &mut attrs);
    if let Some(parameters) = &instance.spec.parameters {
        attrs.set_str("parameters", parameters);
    }
    common::decode_extra_access_rules(instance.spec.extra_access_rules.as_ref(), &mut attrs);
    Ok(attrs)
}

fn decode_instance_metadata(
    meta: &kube::api::ObjectMeta,
    filter: &KeyFilter,
    prior: &Attributes,
    attrs: &mut Attributes,
) -> Result<()> {
    let keep_annotations = metadata::keep_set(prior, "annotations")?;
    let keep_labels = metadata::keep_set(prior, "labels")?;
    metadata::decode_metadata(meta, filter, &keep_annotations, &keep_labels, attrs)
}
