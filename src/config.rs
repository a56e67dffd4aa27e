// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::DEFAULT_OWNER_API_VERSION;
use crate::types::Owner;
use anyhow::{Context, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use std::env;

/// Post-renderer configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub owner_api_version: String,
    pub owner_kind: String,
    pub owner_name: String,
    /// When unset the owner is looked up in the cluster to learn its uid
    pub owner_uid: Option<String>,
    /// Namespace of the owner, empty for cluster-scoped owners
    pub owner_namespace: String,
    pub controller: bool,
    pub block_owner_deletion: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_source<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner_kind = var("OWNER_KIND").context("OWNER_KIND environment variable not set")?;
        let owner_name = var("OWNER_NAME").context("OWNER_NAME environment variable not set")?;
        let owner_api_version =
            var("OWNER_API_VERSION").unwrap_or_else(|| DEFAULT_OWNER_API_VERSION.to_string());
        let owner_uid = var("OWNER_UID").filter(|uid| !uid.is_empty());
        let owner_namespace = var("OWNER_NAMESPACE").unwrap_or_default();
        let controller = parse_flag(var("OWNER_CONTROLLER"));
        let block_owner_deletion = parse_flag(var("OWNER_BLOCK_OWNER_DELETION"));

        Ok(Config {
            owner_api_version,
            owner_kind,
            owner_name,
            owner_uid,
            owner_namespace,
            controller,
            block_owner_deletion,
        })
    }

    /// The owner as configured, or `None` if its uid has to be looked up
    pub fn owner(&self) -> Option<Owner> {
        let uid = self.owner_uid.clone()?;
        Some(Owner {
            reference: OwnerReference {
                api_version: self.owner_api_version.clone(),
                kind: self.owner_kind.clone(),
                name: self.owner_name.clone(),
                uid,
                controller: Some(self.controller),
                block_owner_deletion: Some(self.block_owner_deletion),
            },
            namespace: self.owner_namespace.clone(),
        })
    }
}

fn parse_flag(value: Option<String>) -> bool {
    value.and_then(|v| v.parse().ok()).unwrap_or(true)
}
