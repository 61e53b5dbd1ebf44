// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types managed by the reconcilers.

pub mod common;
pub mod instance;
pub mod project;
pub mod space;
pub mod template;
pub mod virtual_cluster;

pub use instance::{SpaceInstance, SpaceInstanceSpec, VirtualClusterInstance, VirtualClusterInstanceSpec};
pub use project::{Project, ProjectSpec};
pub use space::{Space, SpaceSpec};
pub use template::{Template, TemplateSpec};
pub use virtual_cluster::{VirtualCluster, VirtualClusterSpec};
