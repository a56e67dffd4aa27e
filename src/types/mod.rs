// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resources that own rendered manifests.

pub mod istio;
pub mod owner;

pub use istio::{
    Condition, Istio, IstioCNI, IstioCNISpec, IstioRevision, IstioRevisionSpec, IstioSpec,
    MeshResource, MeshStatus,
};
pub use owner::Owner;
