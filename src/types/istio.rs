// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

fn default_namespace() -> String {
    "istio-system".to_string()
}

fn default_cni_namespace() -> String {
    "istio-cni".to_string()
}

/// Desired state of an Istio control plane installation
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "sailoperator.io", version = "v1", kind = "Istio", plural = "istios")]
#[kube(status = "MeshStatus")]
#[serde(rename_all = "camelCase")]
pub struct IstioSpec {
    pub version: String,
    /// Namespace the control plane is installed into
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Helm values passed through to the charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

/// A single revision of the control plane, usually created from an Istio
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "sailoperator.io", version = "v1", kind = "IstioRevision", plural = "istiorevisions")]
#[kube(status = "MeshStatus")]
#[serde(rename_all = "camelCase")]
pub struct IstioRevisionSpec {
    pub version: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "sailoperator.io", version = "v1", kind = "IstioCNI", plural = "istiocnis")]
#[kube(status = "MeshStatus")]
#[serde(rename_all = "camelCase")]
pub struct IstioCNISpec {
    pub version: String,
    #[serde(default = "default_cni_namespace")]
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeshStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl MeshStatus {
    /// Check for a Ready=True condition
    pub fn is_ready(&self) -> bool {
        self.conditions.as_ref().is_some_and(|conditions| {
            conditions
                .iter()
                .any(|c| c.condition_type == "Ready" && c.status == "True")
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Access to the status shared by all Sail operator resources
pub trait MeshResource {
    fn mesh_status(&self) -> Option<&MeshStatus>;

    fn is_ready(&self) -> bool {
        self.mesh_status().is_some_and(MeshStatus::is_ready)
    }
}

impl MeshResource for Istio {
    fn mesh_status(&self) -> Option<&MeshStatus> {
        self.status.as_ref()
    }
}

impl MeshResource for IstioRevision {
    fn mesh_status(&self) -> Option<&MeshStatus> {
        self.status.as_ref()
    }
}

impl MeshResource for IstioCNI {
    fn mesh_status(&self) -> Option<&MeshStatus> {
        self.status.as_ref()
    }
}
