// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TetherError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Attribute '{attribute}' has an invalid type, expected {expected}")]
    InvalidAttributeType {
        attribute: String,
        expected: &'static str,
    },

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Annotation '{key}' has unparsable value '{value}'")]
    AnnotationParse { key: String, value: String },

    #[error("Unknown cluster: {0}")]
    UnknownCluster(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TetherError>;
