// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Post-renderer that ties rendered manifests to the resource that owns them.
//!
//! Manifests in the owner's namespace (or without a namespace, or any manifest
//! when the owner is cluster-scoped) get an entry appended to
//! `metadata.ownerReferences` so the garbage collector removes them with the
//! owner. Owner references cannot cross namespaces, so manifests in any other
//! namespace get the `operator-sdk/primary-resource*` annotations instead.

use crate::constants::annotations;
use crate::error::{PostRenderError, Result};
use crate::postrender::PostRenderer;
use crate::types::Owner;
use crate::unstructured::{nested_field, nested_sequence, set_nested_field};
use crate::yaml::{decode_documents, encode_documents, Mapping, Node};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use tracing::{debug, instrument, trace};

const NAMESPACE: &[&str] = &["metadata", "namespace"];
const OWNER_REFERENCES: &[&str] = &["metadata", "ownerReferences"];

#[derive(Debug, Clone)]
pub struct OwnerReferencePostRenderer {
    owner_reference: OwnerReference,
    owner_namespace: String,
}

impl OwnerReferencePostRenderer {
    /// An empty `owner_namespace` means the owner is cluster-scoped and every
    /// manifest gets an owner reference.
    pub fn new(owner_reference: OwnerReference, owner_namespace: impl Into<String>) -> Self {
        Self {
            owner_reference,
            owner_namespace: owner_namespace.into(),
        }
    }

    pub fn owner_reference(&self) -> &OwnerReference {
        &self.owner_reference
    }

    pub fn owner_namespace(&self) -> &str {
        &self.owner_namespace
    }

    /// Apply the post-render step to already decoded documents. Null documents
    /// are dropped; anything else that is not a mapping fails the whole batch.
    pub fn process<I>(&self, documents: I) -> Result<Vec<Mapping>>
    where
        I: IntoIterator<Item = Node>,
    {
        documents
            .into_iter()
            .filter_map(|document| self.process_document(document).transpose())
            .collect()
    }

    /// Add the owner reference or the primary-resource annotations to a
    /// single manifest.
    pub fn add_owner_reference(&self, mut manifest: Mapping) -> Result<Mapping> {
        if self.can_own(&manifest)? {
            let mut owner_references = nested_sequence(&manifest, OWNER_REFERENCES)?.unwrap_or_default();
            let owner_reference = serde_json::to_value(&self.owner_reference)
                .map_err(|e| PostRenderError::StreamEncode(e.to_string()))?;
            owner_references.push(Node::from(owner_reference));

            set_nested_field(&mut manifest, Node::Sequence(owner_references), OWNER_REFERENCES)?;
        } else {
            set_nested_field(
                &mut manifest,
                Node::string(self.owner_type()),
                &["metadata", "annotations", annotations::PRIMARY_RESOURCE_TYPE],
            )?;
            set_nested_field(
                &mut manifest,
                Node::string(self.owner_key()),
                &["metadata", "annotations", annotations::PRIMARY_RESOURCE],
            )?;
        }
        Ok(manifest)
    }

    fn process_document(&self, document: Node) -> Result<Option<Mapping>> {
        match document {
            Node::Mapping(manifest) => self.add_owner_reference(manifest).map(Some),
            empty if empty.is_null() => {
                trace!("Skipping empty manifest");
                Ok(None)
            }
            other => Err(PostRenderError::StreamDecode(format!(
                "manifest is a {}, expected a mapping",
                other.type_name()
            ))),
        }
    }

    /// A manifest without a namespace is treated as living in the owner's
    /// namespace; only an explicit, different namespace rules out a reference.
    fn can_own(&self, manifest: &Mapping) -> Result<bool> {
        if self.owner_namespace.is_empty() {
            // metadata still has to be a mapping
            nested_field(manifest, NAMESPACE)?;
            return Ok(true);
        }

        Ok(match nested_field(manifest, NAMESPACE)? {
            None => true,
            Some(namespace) => namespace.as_str() == Some(self.owner_namespace.as_str()),
        })
    }

    /// `<Kind>.<group>`; the group of a core apiVersion such as `v1` is the
    /// apiVersion itself.
    fn owner_type(&self) -> String {
        let api_version = &self.owner_reference.api_version;
        let group = api_version
            .split_once('/')
            .map_or(api_version.as_str(), |(group, _)| group);
        format!("{}.{}", self.owner_reference.kind, group)
    }

    fn owner_key(&self) -> String {
        format!("{}/{}", self.owner_namespace, self.owner_reference.name)
    }
}

impl From<Owner> for OwnerReferencePostRenderer {
    fn from(owner: Owner) -> Self {
        Self::new(owner.reference, owner.namespace)
    }
}

impl PostRenderer for OwnerReferencePostRenderer {
    #[instrument(skip_all, fields(owner = %self.owner_key(), kind = %self.owner_reference.kind))]
    fn run(&self, rendered: &[u8]) -> Result<Vec<u8>> {
        let rendered =
            std::str::from_utf8(rendered).map_err(|e| PostRenderError::StreamDecode(e.to_string()))?;
        let manifests = self.process(decode_documents(rendered)?)?;

        debug!("Post-rendered {} manifests", manifests.len());
        Ok(encode_documents(&manifests)?.into_bytes())
    }
}
