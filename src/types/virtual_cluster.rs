// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::common::Access;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A virtual cluster running inside a namespace of a connected cluster.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "tether.geeko.me", version = "v1", kind = "VirtualCluster")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_release: Option<VirtualClusterHelmRelease>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Vec<Access>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<String>,
}

/// The helm release backing a virtual cluster.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterHelmRelease {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<VirtualClusterHelmChart>,
    /// Helm values, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterHelmChart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}
