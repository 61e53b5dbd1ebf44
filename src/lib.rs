// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Keeps declarative configuration attributes in sync with versioned
//! cluster objects across repeated apply cycles.

pub mod attrs;
pub mod codec;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod filter;
pub mod identity;
pub mod kubernetes;
pub mod reconcilers;
pub mod types;

#[cfg(test)]
pub mod test_utils;
