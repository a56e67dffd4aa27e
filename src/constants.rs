// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Annotations written on manifests that cannot carry an owner reference
pub mod annotations {
    /// `<namespace>/<name>` of the owning resource
    pub const PRIMARY_RESOURCE: &str = "operator-sdk/primary-resource";
    /// `<Kind>.<group>` of the owning resource
    pub const PRIMARY_RESOURCE_TYPE: &str = "operator-sdk/primary-resource-type";
}

/// Default apiVersion of an owner when none is configured
pub const DEFAULT_OWNER_API_VERSION: &str = "sailoperator.io/v1";
