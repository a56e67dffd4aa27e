// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Nested field access on untyped manifests.
//!
//! Manifests are kept as [`yaml::Mapping`](crate::yaml::Mapping) so that
//! unknown fields, their order and their formatting survive a pass through
//! the post-renderer. Every accessor takes the path as a list of keys, e.g.
//! `&["metadata", "namespace"]`.

use crate::error::{PostRenderError, Result};
use crate::yaml::{Mapping, Node};

/// Get the value at `path` without copying it. Returns `None` when any key
/// along the path is missing.
pub fn nested_field<'a>(obj: &'a Mapping, path: &[&str]) -> Result<Option<&'a Node>> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(None);
    };

    let mut current = obj;
    for (i, key) in parents.iter().enumerate() {
        let Some(value) = current.get(key) else {
            return Ok(None);
        };
        current = value
            .as_mapping()
            .ok_or_else(|| type_mismatch(&path[..=i], value, "mapping"))?;
    }

    Ok(current.get(last))
}

/// Get a copy of the sequence at `path`.
pub fn nested_sequence(obj: &Mapping, path: &[&str]) -> Result<Option<Vec<Node>>> {
    match nested_field(obj, path)? {
        None => Ok(None),
        Some(Node::Sequence(seq)) => Ok(Some(seq.clone())),
        Some(other) => Err(type_mismatch(path, other, "sequence")),
    }
}

/// Set `value` at `path`, creating missing intermediate mappings.
pub fn set_nested_field(obj: &mut Mapping, value: Node, path: &[&str]) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut current = obj;
    for (i, key) in parents.iter().enumerate() {
        let entry = current.get_or_insert_with(key, || Node::Mapping(Mapping::new()));
        current = match entry {
            Node::Mapping(m) => m,
            other => return Err(type_mismatch(&path[..=i], other, "mapping")),
        };
    }

    current.insert(last, value);
    Ok(())
}

fn type_mismatch(path: &[&str], found: &Node, expected: &str) -> PostRenderError {
    PostRenderError::StructuralAccess {
        path: path.join("."),
        reason: format!("value is of type {}, expected {}", found.type_name(), expected),
    }
}
