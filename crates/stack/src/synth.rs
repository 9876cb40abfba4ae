// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud assembly output.
//!
//! A synthesized stack is a directory holding the template, an asset
//! manifest when images are published, and `manifest.json` tying them
//! together. Deployment tooling reads the directory; nothing here talks to
//! AWS or docker.

use crate::error::SynthError;
use crate::stack::Stack;
use ghr_core::TagSet;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Cloud assembly schema version written to both manifests.
pub const ASSEMBLY_VERSION: &str = "36.0.0";

pub const DEFAULT_OUT_DIR: &str = "ghr.out";

pub const MANIFEST_FILE: &str = "manifest.json";

/// Where synthesis wrote each artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthReport {
    pub directory: PathBuf,
    pub stack: String,
    pub template: PathBuf,
    pub assets: Option<PathBuf>,
    pub manifest: PathBuf,
    pub resources: usize,
    pub images: Vec<PublishedImage>,
}

/// One image the asset manifest asks deployment tooling to build and push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedImage {
    pub hash: String,
    pub destination: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetManifest {
    version: &'static str,
    docker_images: IndexMap<String, DockerImageEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DockerImageEntry {
    display_name: String,
    source: DockerImageSource,
    destinations: IndexMap<String, DockerImageDestination>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DockerImageSource {
    directory: String,
    platform: &'static str,
    docker_build_args: IndexMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DockerImageDestination {
    repository_name: String,
    image_tag: String,
    region: String,
}

#[derive(Serialize)]
struct AssemblyManifest<'a> {
    version: &'static str,
    artifacts: IndexMap<String, Artifact<'a>>,
}

#[derive(Serialize)]
struct Artifact<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
    properties: ArtifactProperties<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ArtifactProperties<'a> {
    Stack(StackProperties<'a>),
    Assets(AssetProperties),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StackProperties<'a> {
    template_file: String,
    tags: &'a TagSet,
}

#[derive(Serialize)]
struct AssetProperties {
    file: String,
}

/// Write the cloud assembly for `stack` into `out_dir`.
///
/// Build contexts are fingerprinted before anything is written, so an
/// unreadable context leaves `out_dir` untouched.
pub fn synthesize(stack: &Stack, out_dir: &Path) -> Result<SynthReport, SynthError> {
    let (asset_manifest, images) = asset_manifest(stack)?;

    fs::create_dir_all(out_dir)
        .map_err(|source| SynthError::Io { path: out_dir.to_path_buf(), source })?;

    let template_file = format!("{}.template.json", stack.name());
    let template = out_dir.join(&template_file);
    write_json(&template, &stack.template())?;

    // Images publish into a repository this stack creates: assets depend on the stack.
    let mut artifacts = IndexMap::new();
    artifacts.insert(
        stack.name().to_string(),
        Artifact {
            kind: "aws:cloudformation:stack",
            environment: Some(stack.env().to_string()),
            properties: ArtifactProperties::Stack(StackProperties {
                template_file,
                tags: stack.tags(),
            }),
            dependencies: Vec::new(),
        },
    );

    let assets_file = format!("{}.assets.json", stack.name());
    let assets_path = out_dir.join(&assets_file);
    let assets = match asset_manifest {
        Some(manifest) => {
            write_json(&assets_path, &manifest)?;
            artifacts.insert(
                format!("{}.assets", stack.name()),
                Artifact {
                    kind: "cdk:asset-manifest",
                    environment: None,
                    properties: ArtifactProperties::Assets(AssetProperties { file: assets_file }),
                    dependencies: vec![stack.name().to_string()],
                },
            );
            Some(assets_path)
        }
        None => {
            remove_stale(&assets_path)?;
            None
        }
    };

    let manifest = out_dir.join(MANIFEST_FILE);
    write_json(&manifest, &AssemblyManifest { version: ASSEMBLY_VERSION, artifacts })?;

    Ok(SynthReport {
        directory: out_dir.to_path_buf(),
        stack: stack.name().to_string(),
        template,
        assets,
        manifest,
        resources: stack.resource_count(),
        images,
    })
}

/// The asset manifest for every published image, or `None` when the stack
/// publishes nothing.
fn asset_manifest(
    stack: &Stack,
) -> Result<(Option<AssetManifest>, Vec<PublishedImage>), SynthError> {
    if stack.publishes().is_empty() {
        return Ok((None, Vec::new()));
    }

    let mut docker_images: IndexMap<String, DockerImageEntry> = IndexMap::new();
    let mut images = Vec::new();
    for publish in stack.publishes() {
        let Some(asset) = stack.image(&publish.asset) else {
            tracing::warn!(publish = %publish.construct_id, asset = %publish.asset, "publish step names an unknown image asset");
            continue;
        };
        let hash = asset.fingerprint()?;
        let entry = docker_images.entry(hash.clone()).or_insert_with(|| DockerImageEntry {
            display_name: asset.construct_id.clone(),
            source: DockerImageSource {
                directory: asset.directory.display().to_string(),
                platform: asset.platform,
                docker_build_args: asset.build_args.clone(),
            },
            destinations: IndexMap::new(),
        });
        entry.destinations.insert(
            publish.construct_id.clone(),
            DockerImageDestination {
                repository_name: publish.repository.name.clone(),
                image_tag: publish.tag.clone(),
                region: stack.env().region.clone(),
            },
        );
        images.push(PublishedImage { hash, destination: publish.destination() });
    }

    Ok((Some(AssetManifest { version: ASSEMBLY_VERSION, docker_images }), images))
}

/// Drop an asset manifest left by an earlier synthesis that still published.
fn remove_stale(path: &Path) -> Result<(), SynthError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stale artifact");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SynthError::Io { path: path.to_path_buf(), source }),
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), SynthError> {
    let artifact = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|source| SynthError::Json { artifact, source })?;
    json.push('\n');
    fs::write(path, json).map_err(|source| SynthError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
#[path = "synth_tests.rs"]
mod tests;
