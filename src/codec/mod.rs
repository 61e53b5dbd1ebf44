// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Paired encode/decode operations between attribute trees and the
//! structured fields of remote objects.
//!
//! Conventions shared by every codec in this family:
//! - an absent structured sub-object decodes to an absent attribute entry,
//!   and an empty-but-present attribute block encodes to `None` rather than a
//!   zero-value struct, so untouched fields never grow spurious sub-structures
//!   on the remote object;
//! - list order is preserved in both directions;
//! - a failure aborts the whole call, partial results are never returned;
//! - one-of constraints (e.g. owner user vs team) are reconciler
//!   preconditions, not codec concerns.

pub mod common;
pub mod instance;
pub mod metadata;
pub mod project;
pub mod space;
pub mod template;
pub mod virtual_cluster;
