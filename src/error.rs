// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostRenderError {
    #[error("Malformed manifest stream: {0}")]
    StreamDecode(String),

    #[error(".{path} accessor error: {reason}")]
    StructuralAccess { path: String, reason: String },

    #[error("Failed to encode manifest: {0}")]
    StreamEncode(String),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Owner lookup failed: {0}")]
    OwnerLookup(String),

    #[error("Unsupported owner kind: {0}")]
    UnsupportedOwnerKind(String),
}

pub type Result<T> = std::result::Result<T, PostRenderError>;
