// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group and version for all Tether custom resources
pub const API_GROUP: &str = "tether.geeko.me";
pub const API_VERSION: &str = "v1";

/// Annotation key domains used to classify keys as internal or user-owned
pub mod domains {
    /// The platform's own control-annotation namespace
    pub const PLATFORM: &str = "tether.geeko.me";
    /// Reserved top-level domain of the orchestration system
    pub const KUBERNETES: &str = "kubernetes.io";
    /// Well-known sub-domain for user application metadata, never internal
    pub const APP_KUBERNETES: &str = "app.kubernetes.io";
    /// Annotations written by releases predating the tether.geeko.me domain
    pub const DEPRECATED: &str = "kiosk.geeko.me";
}

/// Platform annotation keys the user is permitted to read back and configure
pub mod annotations {
    /// Seconds of inactivity after which a space is put to sleep
    pub const SLEEP_AFTER: &str = "tether.geeko.me/sleep-after";
    /// Seconds of sleep after which a space is deleted
    pub const SLEEP_DELETE_AFTER: &str = "tether.geeko.me/sleep-delete-after";
}
