// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping from the `cluster` scope of a composite identity to a Kubernetes
//! client. Client construction and authentication stay with the caller; the
//! registry only routes.

use crate::error::{Result, TetherError};
use kube::Client;
use std::collections::HashMap;

#[derive(Clone)]
pub struct ClientRegistry {
    management: Client,
    clusters: HashMap<String, Client>,
}

impl ClientRegistry {
    /// A registry with only the management cluster client.
    pub fn new(management: Client) -> Self {
        Self {
            management,
            clusters: HashMap::new(),
        }
    }

    pub fn with_cluster(mut self, name: impl Into<String>, client: Client) -> Self {
        self.clusters.insert(name.into(), client);
        self
    }

    /// Client for the management cluster, which stores projects, templates
    /// and instances.
    pub fn management(&self) -> Client {
        self.management.clone()
    }

    /// Client for a connected cluster, addressed by the cluster part of a
    /// composite identity.
    pub fn cluster(&self, name: &str) -> Result<Client> {
        self.clusters
            .get(name)
            .cloned()
            .ok_or_else(|| TetherError::UnknownCluster(name.to_string()))
    }
}
