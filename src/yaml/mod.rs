// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lossless YAML handling for rendered manifests.
//!
//! Helm output is read with the `yaml-rust2` event parser into a [`Node`]
//! tree that keeps scalars as written, then written back in block style.
//! Fields the post-renderer does not touch come out byte for byte as they
//! went in, as long as the input already used 2-space block style.

mod decode;
mod encode;
mod node;

pub use decode::decode_documents;
pub use encode::{encode_document, encode_documents};
pub use node::{Mapping, Node, Scalar, ScalarKind, ScalarStyle};
