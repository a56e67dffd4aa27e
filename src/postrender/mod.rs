// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Post-renderers that rewrite Helm-rendered manifests before they are applied.

pub mod owner_references;

pub use owner_references::OwnerReferencePostRenderer;

use crate::error::Result;

/// A step that takes a rendered multi-document manifest stream and returns
/// a modified stream in the same format.
pub trait PostRenderer {
    fn run(&self, rendered: &[u8]) -> Result<Vec<u8>>;
}
