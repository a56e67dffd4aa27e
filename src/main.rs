// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::io::{Read, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sail_postrender::config::Config;
use sail_postrender::kubernetes::lookup_owner;
use sail_postrender::postrender::{OwnerReferencePostRenderer, PostRenderer};
use sail_postrender::types::Owner;

/// Helm post-renderer: rendered manifests on stdin, patched manifests on stdout.
#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the manifests, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: owner={} {}, owner_namespace={:?}",
        config.owner_kind, config.owner_name, config.owner_namespace
    );

    let owner = resolve_owner(&config).await?;
    let renderer = OwnerReferencePostRenderer::from(owner);

    let mut rendered = Vec::new();
    std::io::stdin()
        .read_to_end(&mut rendered)
        .context("Failed to read rendered manifests from stdin")?;

    let modified = renderer.run(&rendered)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&modified)
        .and_then(|_| stdout.flush())
        .context("Failed to write manifests to stdout")?;

    Ok(())
}

async fn resolve_owner(config: &Config) -> Result<Owner> {
    if let Some(owner) = config.owner() {
        return Ok(owner);
    }

    info!("OWNER_UID not set, looking up owner in the cluster");
    let client = Client::try_default().await?;
    let owner = lookup_owner(&client, &config.owner_kind, &config.owner_name).await?;
    Ok(owner)
}
