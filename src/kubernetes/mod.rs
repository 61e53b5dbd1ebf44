// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client routing from identity scope to Kubernetes clients.

pub mod registry;

pub use registry::ClientRegistry;
