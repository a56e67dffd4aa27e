// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes API access for resolving the owner of rendered manifests.

pub mod owner;

pub use owner::lookup_owner;
