// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A workspace inside a connected cluster. Cluster-scoped; the cluster it
/// lives in is part of its composite identity, not of the object itself.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "tether.geeko.me", version = "v1", kind = "Space")]
#[kube(status = "SpaceStatus")]
#[serde(rename_all = "camelCase")]
pub struct SpaceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Kubernetes manifests applied into the space on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}
