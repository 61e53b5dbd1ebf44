// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project-scoped instances living in the management cluster. A space
//! instance materializes a space from a template; a virtual cluster instance
//! does the same for a virtual cluster.

use crate::types::common::{InstanceAccessRule, Owner, TemplateRef};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "tether.geeko.me", version = "v1", kind = "SpaceInstance")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct SpaceInstanceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<TemplateRef>,
    /// Template parameter values, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_access_rules: Option<Vec<InstanceAccessRule>>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "tether.geeko.me", version = "v1", kind = "VirtualClusterInstance")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterInstanceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<TemplateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_access_rules: Option<Vec<InstanceAccessRule>>,
}
