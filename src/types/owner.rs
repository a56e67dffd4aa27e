// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};

/// The resource rendered manifests belong to, and the namespace it lives in.
/// An empty namespace means the owner is cluster-scoped.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub reference: OwnerReference,
    pub namespace: String,
}

impl Owner {
    /// Build a controller owner reference for `resource`. Returns `None` when
    /// the resource has no name or uid yet.
    pub fn from_resource<K>(resource: &K) -> Option<Self>
    where
        K: Resource<DynamicType = ()>,
    {
        let reference = resource.controller_owner_ref(&())?;
        Some(Self {
            reference,
            namespace: resource.namespace().unwrap_or_default(),
        })
    }
}
