// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::annotations;
use anyhow::Result;
use std::env;

/// Provider configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform annotation keys that stay visible to user configuration
    pub allowed_platform_annotations: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `TETHER_ALLOWED_ANNOTATIONS` is a comma-separated list of platform
    /// annotation keys; when unset the built-in sleep-schedule keys are used.
    pub fn from_env() -> Result<Self> {
        let allowed_platform_annotations = match env::var("TETHER_ALLOWED_ANNOTATIONS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => Self::default_allowed_annotations(),
        };

        Ok(Config {
            allowed_platform_annotations,
        })
    }

    pub fn default_allowed_annotations() -> Vec<String> {
        vec![
            annotations::SLEEP_AFTER.to_string(),
            annotations::SLEEP_DELETE_AFTER.to_string(),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            allowed_platform_annotations: Self::default_allowed_annotations(),
        }
    }
}
