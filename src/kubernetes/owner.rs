// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Owner lookup against the cluster

use crate::error::{PostRenderError, Result};
use crate::types::{Istio, IstioCNI, IstioRevision, MeshResource, Owner};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Fetch the named Sail operator resource and build the owner for it
#[instrument(skip(client))]
pub async fn lookup_owner(client: &Client, kind: &str, name: &str) -> Result<Owner> {
    match kind {
        "Istio" => fetch_owner::<Istio>(client, name).await,
        "IstioRevision" => fetch_owner::<IstioRevision>(client, name).await,
        "IstioCNI" => fetch_owner::<IstioCNI>(client, name).await,
        other => Err(PostRenderError::UnsupportedOwnerKind(other.to_string())),
    }
}

async fn fetch_owner<K>(client: &Client, name: &str) -> Result<Owner>
where
    K: Resource<DynamicType = ()> + MeshResource + Clone + DeserializeOwned + Debug,
{
    let kind = K::kind(&());
    let api: Api<K> = Api::all(client.clone());

    info!("Looking up owner {} '{}'...", kind, name);
    let resource = api.get(name).await?;

    if !resource.is_ready() {
        debug!("Owner {} '{}' is not ready yet", kind, name);
    }

    Owner::from_resource(&resource).ok_or_else(|| {
        PostRenderError::OwnerLookup(format!(
            "{} '{}' has no uid",
            kind,
            resource.name_any()
        ))
    })
}
